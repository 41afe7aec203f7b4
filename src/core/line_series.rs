use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, LinearScale, SeriesPoint};
use crate::error::ChartResult;

/// One drawing command of a pixel-space path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    Close,
}

impl PathCommand {
    /// End point of the command, `None` for `Close`.
    #[must_use]
    pub fn end_point(self) -> Option<(f64, f64)> {
        match self {
            Self::MoveTo { x, y } | Self::LineTo { x, y } | Self::CubicTo { x, y, .. } => {
                Some((x, y))
            }
            Self::Close => None,
        }
    }
}

/// Pixel-space geometry of one line series.
///
/// Each subpath covers one run of consecutive defined samples; a missing value
/// always ends the current subpath.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinePath {
    pub subpaths: Vec<Vec<PathCommand>>,
}

impl LinePath {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// All commands, subpath after subpath.
    pub fn commands(&self) -> impl Iterator<Item = PathCommand> + '_ {
        self.subpaths.iter().flatten().copied()
    }

    /// Last drawn vertex of the whole path.
    #[must_use]
    pub fn last_point(&self) -> Option<(f64, f64)> {
        self.subpaths
            .last()
            .and_then(|subpath| subpath.iter().rev().find_map(|command| command.end_point()))
    }
}

/// How the first vertex of a monotone run joins the path built so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunStart {
    Move,
    Line,
}

/// Splits samples into runs of consecutive defined points.
#[must_use]
pub fn defined_runs(points: &[SeriesPoint]) -> Vec<Vec<DataPoint>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for point in points {
        match point.defined() {
            Some(defined) => current.push(defined),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Projects samples into a monotone-in-x curve that breaks at missing values.
pub fn project_line_path(
    points: &[SeriesPoint],
    x_scale: LinearScale,
    y_scale: LinearScale,
) -> ChartResult<LinePath> {
    let mut subpaths = Vec::new();
    for run in defined_runs(points) {
        let mut mapped = Vec::with_capacity(run.len());
        for point in &run {
            mapped.push((
                x_scale.domain_to_pixel(point.x)?,
                y_scale.domain_to_pixel(point.y)?,
            ));
        }
        let mut commands = Vec::with_capacity(mapped.len());
        append_monotone_run(&mapped, RunStart::Move, &mut commands);
        subpaths.push(commands);
    }
    Ok(LinePath { subpaths })
}

/// Appends a monotone cubic interpolation of `points` to `commands`.
///
/// Tangents follow Steffen's method, which never overshoots between samples.
/// Consecutive coincident points are ignored.
pub(crate) fn append_monotone_run(
    points: &[(f64, f64)],
    start: RunStart,
    commands: &mut Vec<PathCommand>,
) {
    let mut deduped: Vec<(f64, f64)> = Vec::with_capacity(points.len());
    for &point in points {
        if deduped.last() != Some(&point) {
            deduped.push(point);
        }
    }

    let Some(&(x0, y0)) = deduped.first() else {
        return;
    };
    commands.push(match start {
        RunStart::Move => PathCommand::MoveTo { x: x0, y: y0 },
        RunStart::Line => PathCommand::LineTo { x: x0, y: y0 },
    });

    match deduped.len() {
        1 => {}
        2 => {
            let (x, y) = deduped[1];
            commands.push(PathCommand::LineTo { x, y });
        }
        len => {
            let mut tangents = vec![0.0; len];
            for index in 1..len - 1 {
                tangents[index] =
                    interior_tangent(deduped[index - 1], deduped[index], deduped[index + 1]);
            }
            tangents[0] = endpoint_tangent(deduped[0], deduped[1], tangents[1]);
            tangents[len - 1] =
                endpoint_tangent(deduped[len - 2], deduped[len - 1], tangents[len - 2]);

            for index in 1..len {
                let (x0, y0) = deduped[index - 1];
                let (x1, y1) = deduped[index];
                let dx = (x1 - x0) / 3.0;
                commands.push(PathCommand::CubicTo {
                    x1: x0 + dx,
                    y1: y0 + dx * tangents[index - 1],
                    x2: x1 - dx,
                    y2: y1 - dx * tangents[index],
                    x: x1,
                    y: y1,
                });
            }
        }
    }
}

fn interior_tangent(previous: (f64, f64), current: (f64, f64), next: (f64, f64)) -> f64 {
    let h0 = current.0 - previous.0;
    let h1 = next.0 - current.0;
    if h0 == 0.0 || h1 == 0.0 || h0 + h1 == 0.0 {
        return 0.0;
    }
    let s0 = (current.1 - previous.1) / h0;
    let s1 = (next.1 - current.1) / h1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let tangent = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if tangent.is_finite() { tangent } else { 0.0 }
}

fn endpoint_tangent(from: (f64, f64), to: (f64, f64), neighbour_tangent: f64) -> f64 {
    let h = to.0 - from.0;
    if h == 0.0 {
        return neighbour_tangent;
    }
    (3.0 * (to.1 - from.1) / h - neighbour_tangent) / 2.0
}

fn sign(value: f64) -> f64 {
    if value < 0.0 { -1.0 } else { 1.0 }
}
