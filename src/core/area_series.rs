use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::core::line_series::{PathCommand, RunStart, append_monotone_run};
use crate::error::ChartResult;

/// Sample of a band between two series at one x position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPoint {
    pub x: f64,
    pub upper: Option<f64>,
    pub lower: Option<f64>,
}

impl BandPoint {
    #[must_use]
    pub fn new(x: f64, upper: Option<f64>, lower: Option<f64>) -> Self {
        Self { x, upper, lower }
    }

    fn defined(self) -> Option<(f64, f64, f64)> {
        match (self.upper, self.lower) {
            (Some(upper), Some(lower))
                if self.x.is_finite() && upper.is_finite() && lower.is_finite() =>
            {
                Some((self.x, upper, lower))
            }
            _ => None,
        }
    }
}

/// Closed polygons filling the space between two curves.
///
/// There is one polygon per run of samples where both edges are defined.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BandGeometry {
    pub polygons: Vec<Vec<PathCommand>>,
}

impl BandGeometry {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

/// Projects a band: the upper edge left to right, the lower edge back right
/// to left, both with monotone interpolation, then closes the polygon.
pub fn project_band_geometry(
    points: &[BandPoint],
    x_scale: LinearScale,
    y_scale: LinearScale,
) -> ChartResult<BandGeometry> {
    let mut polygons = Vec::new();
    let mut run: Vec<(f64, f64, f64)> = Vec::new();

    for point in points {
        match point.defined() {
            Some((x, upper, lower)) => run.push((
                x_scale.domain_to_pixel(x)?,
                y_scale.domain_to_pixel(upper)?,
                y_scale.domain_to_pixel(lower)?,
            )),
            None => flush_band_run(&mut run, &mut polygons),
        }
    }
    flush_band_run(&mut run, &mut polygons);

    Ok(BandGeometry { polygons })
}

fn flush_band_run(run: &mut Vec<(f64, f64, f64)>, polygons: &mut Vec<Vec<PathCommand>>) {
    if run.is_empty() {
        return;
    }
    let upper: Vec<(f64, f64)> = run.iter().map(|&(x, upper, _)| (x, upper)).collect();
    let lower: Vec<(f64, f64)> = run.iter().rev().map(|&(x, _, lower)| (x, lower)).collect();

    let mut commands = Vec::with_capacity(run.len() * 2 + 1);
    append_monotone_run(&upper, RunStart::Move, &mut commands);
    append_monotone_run(&lower, RunStart::Line, &mut commands);
    commands.push(PathCommand::Close);
    polygons.push(commands);
    run.clear();
}
