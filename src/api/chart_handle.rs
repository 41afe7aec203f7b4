use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{BandGeometry, LinePath, LinearScale, Viewport};
use crate::render::{LayerId, LayeredRenderFrame, SeriesKey};

use super::axis_label_format::ValueFormat;
use super::{BrandPalette, ChartLayout};

/// The three charts of the article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Budget,
    Crime,
    Clearance,
}

impl ChartKind {
    pub const ALL: [Self; 3] = [Self::Budget, Self::Crime, Self::Clearance];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Crime => "crime",
            Self::Clearance => "clearance",
        }
    }

    /// Number of narrative steps attached to the chart.
    #[must_use]
    pub const fn step_count(self) -> usize {
        match self {
            Self::Budget => 7,
            Self::Crime => 5,
            Self::Clearance => 3,
        }
    }

    #[must_use]
    pub const fn value_format(self) -> ValueFormat {
        match self {
            Self::Budget => ValueFormat::EuroBillions,
            Self::Crime => ValueFormat::Thousands,
            Self::Clearance => ValueFormat::Percent,
        }
    }

    /// Whether grid and axes are revealed by the step sequence or always shown.
    #[must_use]
    pub const fn reveals_axes(self) -> bool {
        matches!(self, Self::Budget)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs shared by every chart builder.
#[derive(Debug, Clone, Copy)]
pub struct ChartBuildContext<'a> {
    pub viewport: Viewport,
    pub palette: &'a BrandPalette,
    pub layout: &'a ChartLayout,
}

/// Value label drawn next to the end of a series line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndLabel {
    pub series: SeriesKey,
    pub year: i32,
    pub value: f64,
    /// Anchor in plot-space pixels, already shifted right of the point.
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLayer {
    pub key: SeriesKey,
    pub path: LinePath,
    pub end_label: Option<EndLabel>,
}

/// A fully built chart, owned by the caller.
///
/// Geometry is fixed at construction; only layer opacities change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle {
    kind: ChartKind,
    frame: LayeredRenderFrame,
    x_scale: LinearScale,
    y_scale: LinearScale,
    series: Vec<SeriesLayer>,
    band: Option<BandGeometry>,
}

impl ChartHandle {
    pub(super) fn new(
        kind: ChartKind,
        frame: LayeredRenderFrame,
        x_scale: LinearScale,
        y_scale: LinearScale,
        series: Vec<SeriesLayer>,
    ) -> Self {
        Self {
            kind,
            frame,
            x_scale,
            y_scale,
            series,
            band: None,
        }
    }

    pub(super) fn set_band(&mut self, band: BandGeometry) {
        self.band = Some(band);
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn frame(&self) -> &LayeredRenderFrame {
        &self.frame
    }

    /// Mutable access for opacity updates.
    pub fn frame_mut(&mut self) -> &mut LayeredRenderFrame {
        &mut self.frame
    }

    #[must_use]
    pub fn x_scale(&self) -> LinearScale {
        self.x_scale
    }

    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        self.y_scale
    }

    #[must_use]
    pub fn layer_ids(&self) -> Vec<LayerId> {
        self.frame.layer_ids()
    }

    #[must_use]
    pub fn series(&self) -> &[SeriesLayer] {
        &self.series
    }

    #[must_use]
    pub fn series_layer(&self, key: SeriesKey) -> Option<&SeriesLayer> {
        self.series.iter().find(|series| series.key == key)
    }

    #[must_use]
    pub fn end_label(&self, key: SeriesKey) -> Option<&EndLabel> {
        self.series_layer(key)
            .and_then(|series| series.end_label.as_ref())
    }

    #[must_use]
    pub fn band(&self) -> Option<&BandGeometry> {
        self.band.as_ref()
    }
}
