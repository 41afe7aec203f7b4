use crate::error::ChartResult;
use crate::render::{LayeredRenderFrame, Renderer};

/// No-op renderer used by tests and headless runs.
///
/// It still validates frame content so invalid geometry surfaces without a
/// real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_primitive_count: usize,
    pub last_visible_layer_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &LayeredRenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_primitive_count = frame.primitive_count();
        self.last_visible_layer_count = frame.visible_layer_count();
        Ok(())
    }
}
