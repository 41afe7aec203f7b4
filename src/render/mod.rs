mod layer_stack;
mod layered_frame;
mod null_renderer;
mod primitives;
mod svg_backend;

pub use layer_stack::{LayerId, SeriesKey, canonical_layer_stack};
pub use layered_frame::{LayerPrimitives, LayeredRenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, FillStyle, LinePrimitive, PathPrimitive, StrokeStyle, TextBaseline, TextHAlign,
    TextPrimitive,
};
pub use svg_backend::{SvgRenderStats, SvgRenderer, path_data};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic frame so drawing code
/// stays isolated from chart construction and reveal sequencing.
pub trait Renderer {
    fn render(&mut self, frame: &LayeredRenderFrame) -> ChartResult<()>;
}
