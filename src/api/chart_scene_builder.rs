use ordered_float::OrderedFloat;
use tracing::debug;

use crate::core::{LinearScale, PlotArea, SeriesPoint, project_line_path};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LayerId, LayeredRenderFrame, LinePrimitive, PathPrimitive, SeriesKey, TextBaseline,
    TextHAlign, TextPrimitive, canonical_layer_stack,
};

use super::axis_ticks::{AxisRenderContext, append_axis_primitives};
use super::{ChartBuildContext, ChartHandle, ChartKind, EndLabel, SeriesLayer};

const LEGEND_TEXT_GAP_PX: f64 = 10.0;
const LEGEND_TEXT_DROP_PX: f64 = 5.0;

/// Where a series' end label is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum EndLabelAnchor {
    /// Last sample with a value.
    LastDefined,
    /// Second-to-last record of the dataset, or the last defined sample
    /// when that record has no value.
    SecondToLastRecord,
}

#[derive(Debug, Clone)]
pub(super) struct SeriesSpec {
    pub key: SeriesKey,
    pub legend_label: &'static str,
    pub color: Color,
    pub dashed_legend: bool,
    pub anchor: EndLabelAnchor,
    pub points: Vec<SeriesPoint>,
}

/// Value-axis domain before headroom is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ValueDomain {
    pub floor: f64,
    pub max: Option<f64>,
    pub headroom: f64,
}

/// Largest defined value, ignoring gaps and non-finite samples.
pub(super) fn max_defined(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    values
        .into_iter()
        .flatten()
        .filter(|value| value.is_finite())
        .map(OrderedFloat)
        .max()
        .map(OrderedFloat::into_inner)
}

pub(super) fn plot_area(ctx: &ChartBuildContext<'_>) -> ChartResult<PlotArea> {
    let invalid = ChartError::InvalidViewport {
        width: ctx.viewport.width,
        height: ctx.viewport.height,
    };
    if !ctx.viewport.is_valid() {
        return Err(invalid);
    }
    PlotArea::inside(ctx.viewport, ctx.layout.margins).ok_or(invalid)
}

pub(super) fn value_scale(domain: ValueDomain, plot: PlotArea) -> ChartResult<LinearScale> {
    let low = domain.floor;
    let high = domain.max.map(|max| max * domain.headroom);
    let high = match high {
        Some(high) if high.is_finite() && high > low => high,
        _ => {
            let widened = low + (low.abs() * 0.1).max(1.0);
            debug!(floor = low, max = ?domain.max, widened, "value domain widened");
            widened
        }
    };
    LinearScale::new((low, high), (plot.height, 0.0))
}

/// Builds scales, axes, series lines, end labels and legend entries.
///
/// All layers start hidden; charts whose axes are not part of the reveal get
/// their grid and axes shown right away.
pub(super) fn assemble_chart(
    kind: ChartKind,
    dataset: &'static str,
    ctx: &ChartBuildContext<'_>,
    years: &[i32],
    domain: ValueDomain,
    series: Vec<SeriesSpec>,
    with_band: bool,
) -> ChartResult<ChartHandle> {
    if years.is_empty() {
        return Err(ChartError::EmptyDataset { dataset });
    }
    let plot = plot_area(ctx)?;
    let x_scale =
        LinearScale::from_extent(years.iter().map(|&year| f64::from(year)), (0.0, plot.width))?;
    let y_scale = value_scale(domain, plot)?;

    let keys: Vec<SeriesKey> = series.iter().map(|spec| spec.key).collect();
    let stack = canonical_layer_stack(&keys, with_band);
    let mut frame = LayeredRenderFrame::from_stack(ctx.viewport, plot, &stack, 0.0);

    append_axis_primitives(
        &mut frame,
        AxisRenderContext {
            plot,
            x_scale,
            y_scale,
            value_format: kind.value_format(),
            axis_color: ctx.palette.axis(),
            grid_color: ctx.palette.grid_line(),
            font_px: ctx.layout.axis_font_px,
        },
    )?;
    if !kind.reveals_axes() {
        for layer in [LayerId::Grid, LayerId::XAxis, LayerId::YAxis] {
            frame.set_opacity(layer, 1.0);
        }
    }

    let layout = ctx.layout;
    let legend_x = plot.width + layout.legend_offset_x;
    let mut layers = Vec::with_capacity(series.len());
    for (index, spec) in series.into_iter().enumerate() {
        let path = project_line_path(&spec.points, x_scale, y_scale)?;
        for subpath in &path.subpaths {
            frame.push_path(
                LayerId::Line(spec.key),
                PathPrimitive::stroked(subpath.clone(), spec.color, layout.series_stroke_width),
            );
        }

        let end_label = end_label(&spec, kind, x_scale, y_scale, layout.end_label_offset_px)?;
        if let Some(label) = &end_label {
            frame.push_text(
                LayerId::Line(spec.key),
                TextPrimitive::new(
                    label.text.clone(),
                    label.x,
                    label.y,
                    layout.end_label_font_px,
                    spec.color,
                    TextHAlign::Left,
                )
                .with_baseline(TextBaseline::Middle)
                .bold(),
            );
        }

        let legend_y = layout.legend_offset_y + index as f64 * layout.legend_row_spacing;
        let mut swatch = LinePrimitive::new(
            legend_x,
            legend_y,
            legend_x + layout.legend_swatch_width,
            legend_y,
            layout.series_stroke_width,
            spec.color,
        );
        if spec.dashed_legend {
            swatch = swatch.with_dash(5.0, 5.0);
        }
        frame.push_line(LayerId::Legend(spec.key), swatch);
        frame.push_text(
            LayerId::Legend(spec.key),
            TextPrimitive::new(
                spec.legend_label,
                legend_x + layout.legend_swatch_width + LEGEND_TEXT_GAP_PX,
                legend_y + LEGEND_TEXT_DROP_PX,
                layout.legend_font_px,
                ctx.palette.axis(),
                TextHAlign::Left,
            ),
        );

        layers.push(SeriesLayer {
            key: spec.key,
            path,
            end_label,
        });
    }

    frame.validate()?;
    debug!(
        chart = kind.name(),
        records = years.len(),
        layers = frame.layers.len(),
        primitives = frame.primitive_count(),
        "chart built"
    );
    Ok(ChartHandle::new(kind, frame, x_scale, y_scale, layers))
}

fn end_label(
    spec: &SeriesSpec,
    kind: ChartKind,
    x_scale: LinearScale,
    y_scale: LinearScale,
    offset_px: f64,
) -> ChartResult<Option<EndLabel>> {
    let last_defined = || spec.points.iter().rev().find_map(|point| point.defined());
    let anchor = match spec.anchor {
        EndLabelAnchor::LastDefined => last_defined(),
        EndLabelAnchor::SecondToLastRecord => spec
            .points
            .len()
            .checked_sub(2)
            .and_then(|index| spec.points[index].defined())
            .or_else(last_defined),
    };
    let Some(point) = anchor else {
        return Ok(None);
    };

    Ok(Some(EndLabel {
        series: spec.key,
        year: point.x.round() as i32,
        value: point.y,
        x: x_scale.domain_to_pixel(point.x)? + offset_px,
        y: y_scale.domain_to_pixel(point.y)?,
        text: kind.value_format().end_label(point.y),
    }))
}
