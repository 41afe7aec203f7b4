use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::error::{ChartError, ChartResult};

/// Measured vertical extent of one narrative step, in document pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepBox {
    pub top: f64,
    pub height: f64,
}

impl StepBox {
    #[must_use]
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Half-open containment: the bottom edge belongs to the next step.
    #[must_use]
    pub fn contains(self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }

    fn validate(self) -> ChartResult<()> {
        if !self.top.is_finite() || !self.height.is_finite() || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "step box must have a finite top and a finite, non-negative height".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum StepEvent {
    Enter {
        step: usize,
        direction: ScrollDirection,
    },
    Exit {
        step: usize,
        direction: ScrollDirection,
    },
}

impl StepEvent {
    #[must_use]
    pub fn step(self) -> usize {
        match self {
            Self::Enter { step, .. } | Self::Exit { step, .. } => step,
        }
    }
}

/// At most one exit and one enter per scroll update.
pub type StepEvents = SmallVec<[StepEvent; 2]>;

/// Turns scroll offsets into step enter/exit events for one chart.
///
/// The active step is the one whose box contains the trigger line at
/// `scroll_top + offset * viewport_height`.
#[derive(Debug, Clone, PartialEq)]
pub struct StepObserver {
    offset: f64,
    boxes: Vec<StepBox>,
    active: Option<usize>,
    last_scroll_top: Option<f64>,
}

impl StepObserver {
    pub fn new(offset: f64, boxes: Vec<StepBox>) -> ChartResult<Self> {
        if !offset.is_finite() || !(0.0..=1.0).contains(&offset) {
            return Err(ChartError::InvalidData(
                "step observer offset must be in [0, 1]".to_owned(),
            ));
        }
        for step_box in &boxes {
            step_box.validate()?;
        }
        Ok(Self {
            offset,
            boxes,
            active: None,
            last_scroll_top: None,
        })
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn step_boxes(&self) -> &[StepBox] {
        &self.boxes
    }

    #[must_use]
    pub fn active_step(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn is_active(&self, step: usize) -> bool {
        self.active == Some(step)
    }

    #[must_use]
    pub fn trigger_line(&self, scroll_top: f64, viewport_height: f64) -> f64 {
        scroll_top + self.offset * viewport_height
    }

    /// Classifies a new scroll position; non-finite input is ignored.
    pub fn on_scroll(&mut self, scroll_top: f64, viewport_height: f64) -> StepEvents {
        let mut events = StepEvents::new();
        if !scroll_top.is_finite() || !viewport_height.is_finite() {
            return events;
        }

        let direction = match self.last_scroll_top {
            Some(previous) if scroll_top < previous => ScrollDirection::Up,
            _ => ScrollDirection::Down,
        };
        self.last_scroll_top = Some(scroll_top);

        let trigger = self.trigger_line(scroll_top, viewport_height);
        let next = self.boxes.iter().position(|step_box| step_box.contains(trigger));
        if next == self.active {
            return events;
        }

        if let Some(step) = self.active {
            events.push(StepEvent::Exit { step, direction });
        }
        if let Some(step) = next {
            events.push(StepEvent::Enter { step, direction });
        }
        trace!(trigger, from = ?self.active, to = ?next, ?direction, "active step changed");
        self.active = next;
        events
    }

    /// Replaces the measured boxes; an active step that no longer exists is cleared.
    pub fn resize(&mut self, boxes: Vec<StepBox>) -> ChartResult<()> {
        for step_box in &boxes {
            step_box.validate()?;
        }
        if self.active.is_some_and(|step| step >= boxes.len()) {
            self.active = None;
        }
        self.boxes = boxes;
        Ok(())
    }
}
