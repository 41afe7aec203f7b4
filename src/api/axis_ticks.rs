use crate::core::{LinearScale, PlotArea};
use crate::error::ChartResult;
use crate::render::{
    Color, LayerId, LayeredRenderFrame, LinePrimitive, TextBaseline, TextHAlign, TextPrimitive,
};

use super::axis_label_format::{ValueFormat, format_year_label};

pub(super) const AXIS_YEAR_TARGET_SPACING_PX: f64 = 72.0;
pub(super) const AXIS_VALUE_TARGET_SPACING_PX: f64 = 50.0;
pub(super) const AXIS_MIN_TICKS: usize = 2;
pub(super) const AXIS_MAX_TICKS: usize = 10;
const AXIS_TICK_SIZE_PX: f64 = 6.0;
const AXIS_TICK_PADDING_PX: f64 = 3.0;
const AXIS_STROKE_WIDTH: f64 = 1.0;

pub(super) fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

/// Whole-year tick values; fractional ticks of a narrow domain are dropped.
pub(super) fn year_ticks(x_scale: LinearScale, plot: PlotArea) -> Vec<f64> {
    let count = axis_tick_target_count(
        plot.width,
        AXIS_YEAR_TARGET_SPACING_PX,
        AXIS_MIN_TICKS,
        AXIS_MAX_TICKS,
    );
    x_scale
        .ticks(count)
        .into_iter()
        .filter(|tick| tick.fract().abs() < 1e-9)
        .collect()
}

pub(super) fn value_ticks(y_scale: LinearScale, plot: PlotArea) -> Vec<f64> {
    let count = axis_tick_target_count(
        plot.height,
        AXIS_VALUE_TARGET_SPACING_PX,
        AXIS_MIN_TICKS,
        AXIS_MAX_TICKS,
    );
    y_scale.ticks(count)
}

#[derive(Debug, Clone, Copy)]
pub(super) struct AxisRenderContext {
    pub plot: PlotArea,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub value_format: ValueFormat,
    pub axis_color: Color,
    pub grid_color: Color,
    pub font_px: f64,
}

/// Fills the grid, x-axis and y-axis layers of `frame`.
pub(super) fn append_axis_primitives(
    frame: &mut LayeredRenderFrame,
    ctx: AxisRenderContext,
) -> ChartResult<()> {
    let plot = ctx.plot;
    let value_ticks = value_ticks(ctx.y_scale, plot);

    for &tick in &value_ticks {
        let y = ctx.y_scale.domain_to_pixel(tick)?;
        frame.push_line(
            LayerId::Grid,
            LinePrimitive::new(0.0, y, plot.width, y, AXIS_STROKE_WIDTH, ctx.grid_color),
        );
        frame.push_line(
            LayerId::YAxis,
            LinePrimitive::new(
                -AXIS_TICK_SIZE_PX,
                y,
                0.0,
                y,
                AXIS_STROKE_WIDTH,
                ctx.axis_color,
            ),
        );
        frame.push_text(
            LayerId::YAxis,
            TextPrimitive::new(
                ctx.value_format.axis_label(tick),
                -(AXIS_TICK_SIZE_PX + AXIS_TICK_PADDING_PX),
                y,
                ctx.font_px,
                ctx.axis_color,
                TextHAlign::Right,
            )
            .with_baseline(TextBaseline::Middle),
        );
    }
    frame.push_line(
        LayerId::YAxis,
        LinePrimitive::new(0.0, 0.0, 0.0, plot.height, AXIS_STROKE_WIDTH, ctx.axis_color),
    );

    for tick in year_ticks(ctx.x_scale, plot) {
        let x = ctx.x_scale.domain_to_pixel(tick)?;
        frame.push_line(
            LayerId::XAxis,
            LinePrimitive::new(
                x,
                plot.height,
                x,
                plot.height + AXIS_TICK_SIZE_PX,
                AXIS_STROKE_WIDTH,
                ctx.axis_color,
            ),
        );
        frame.push_text(
            LayerId::XAxis,
            TextPrimitive::new(
                format_year_label(tick),
                x,
                plot.height + AXIS_TICK_SIZE_PX + AXIS_TICK_PADDING_PX + ctx.font_px * 0.71,
                ctx.font_px,
                ctx.axis_color,
                TextHAlign::Center,
            ),
        );
    }
    frame.push_line(
        LayerId::XAxis,
        LinePrimitive::new(
            0.0,
            plot.height,
            plot.width,
            plot.height,
            AXIS_STROKE_WIDTH,
            ctx.axis_color,
        ),
    );

    Ok(())
}
