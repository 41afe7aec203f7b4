use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::error::ChartResult;
use crate::render::{LayerId, LayeredRenderFrame};

use super::ChartKind;
use super::reveal_table::{RevealState, RevealTable, revealable_layers};
use super::transition::{Easing, OpacityTransition};

/// Layers touched by one `enter_step` call.
pub type StartedLayers = SmallVec<[LayerId; 8]>;

#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub step: usize,
    /// Layers that received a new transition.
    pub started: StartedLayers,
    /// Layers whose in-flight transition already headed to the new target.
    pub kept: usize,
}

/// Drives one chart's layer opacities toward the target of the entered step.
///
/// Time is explicit: callers pass `now_ms` to `enter_step` and `tick`.
#[derive(Debug, Clone)]
pub struct RevealSequencer {
    table: RevealTable,
    easing: Easing,
    current: IndexMap<LayerId, f64>,
    transitions: IndexMap<LayerId, OpacityTransition>,
    active_step: Option<usize>,
}

impl RevealSequencer {
    #[must_use]
    pub fn new(kind: ChartKind) -> Self {
        Self::with_easing(kind, Easing::default())
    }

    #[must_use]
    pub fn with_easing(kind: ChartKind, easing: Easing) -> Self {
        let table = RevealTable::for_chart(kind);
        let current = revealable_layers(kind)
            .into_iter()
            .map(|layer| (layer, 0.0))
            .collect();
        Self {
            table,
            easing,
            current,
            transitions: IndexMap::new(),
            active_step: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.table.kind()
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.table.step_count()
    }

    pub fn target_state(&self, step: usize) -> ChartResult<&RevealState> {
        self.table.state(step)
    }

    /// Marks `step` active and starts transitions toward its target state.
    ///
    /// A layer already at its target starts nothing; a layer whose in-flight
    /// transition heads elsewhere is re-targeted from its current value.
    pub fn enter_step(&mut self, step: usize, now_ms: f64) -> ChartResult<StepOutcome> {
        let row = self.table.step(step)?;
        let duration_ms = row.duration_ms;
        let targets: SmallVec<[(LayerId, f64); 16]> = row.state.iter().collect();
        self.tick(now_ms);

        let mut started = StartedLayers::new();
        let mut kept = 0;
        for (layer, target) in targets {
            if let Some(in_flight) = self.transitions.get(&layer) {
                if in_flight.to == target {
                    kept += 1;
                    continue;
                }
                self.transitions.shift_remove(&layer);
            }
            let from = self.current.get(&layer).copied().unwrap_or(0.0);
            if from == target {
                continue;
            }
            self.transitions.insert(
                layer,
                OpacityTransition::new(from, target, now_ms, duration_ms, self.easing),
            );
            started.push(layer);
        }

        self.active_step = Some(step);
        trace!(
            chart = self.kind().name(),
            step,
            started = started.len(),
            kept,
            "step entered"
        );
        Ok(StepOutcome {
            step,
            started,
            kept,
        })
    }

    /// Clears the active marker when `step` is the active step.
    pub fn exit_step(&mut self, step: usize) -> bool {
        if self.active_step == Some(step) {
            self.active_step = None;
            trace!(chart = self.kind().name(), step, "step exited");
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn active_step(&self) -> Option<usize> {
        self.active_step
    }

    #[must_use]
    pub fn is_active(&self, step: usize) -> bool {
        self.active_step == Some(step)
    }

    /// Advances every transition to `now_ms` and drops finished ones.
    ///
    /// Returns the number of transitions still running.
    pub fn tick(&mut self, now_ms: f64) -> usize {
        let current = &mut self.current;
        self.transitions.retain(|layer, transition| {
            current.insert(*layer, transition.value_at(now_ms));
            !transition.is_complete(now_ms)
        });
        if !self.transitions.is_empty() {
            trace!(
                chart = self.table.kind().name(),
                now_ms,
                running = self.transitions.len(),
                "transitions ticked"
            );
        }
        self.transitions.len()
    }

    /// Jumps every running transition to its target.
    pub fn settle(&mut self) {
        for (layer, transition) in self.transitions.drain(..) {
            self.current.insert(layer, transition.to);
        }
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.transitions.is_empty()
    }

    #[must_use]
    pub fn opacity(&self, layer: LayerId) -> Option<f64> {
        self.current.get(&layer).copied()
    }

    /// Current opacities of every revealable layer.
    #[must_use]
    pub fn current_state(&self) -> RevealState {
        self.current
            .iter()
            .map(|(&layer, &opacity)| (layer, opacity))
            .collect()
    }

    /// Writes current opacities into `frame`; layers outside the reveal are untouched.
    pub fn apply_to(&self, frame: &mut LayeredRenderFrame) {
        for (&layer, &opacity) in &self.current {
            frame.set_opacity(layer, opacity);
        }
    }
}
