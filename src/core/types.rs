use serde::{Deserialize, Serialize};

/// Pixel size of one chart container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Space reserved around the plot area for axes, labels and the legend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 120.0,
            bottom: 60.0,
            left: 80.0,
        }
    }
}

/// Inner drawing area of a chart, in pixels, after margins are removed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Returns `None` when the margins leave no drawable space.
    #[must_use]
    pub fn inside(viewport: Viewport, margins: Margins) -> Option<Self> {
        let width = f64::from(viewport.width) - margins.left - margins.right;
        let height = f64::from(viewport.height) - margins.top - margins.bottom;
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Self {
            left: margins.left,
            top: margins.top,
            width,
            height,
        })
    }
}

/// A fully defined sample in data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A sample that may be missing its value; `None` is a gap, never a zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: f64,
    pub y: Option<f64>,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(x: f64, y: Option<f64>) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn defined(self) -> Option<DataPoint> {
        match self.y {
            Some(y) if y.is_finite() && self.x.is_finite() => Some(DataPoint::new(self.x, y)),
            _ => None,
        }
    }
}
