use crate::core::{PlotArea, Viewport};
use crate::error::{ChartError, ChartResult};

use super::{LayerId, LinePrimitive, PathPrimitive, TextPrimitive};

#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub layer: LayerId,
    pub opacity: f64,
    pub lines: Vec<LinePrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.lines.len() + self.paths.len() + self.texts.len()
    }
}

/// Backend-agnostic scene of one chart, split into opacity-controlled layers.
///
/// Primitive coordinates are relative to the plot area's top-left corner;
/// backends translate by `plot.left`/`plot.top`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredRenderFrame {
    pub viewport: Viewport,
    pub plot: PlotArea,
    pub layers: Vec<LayerPrimitives>,
}

impl LayeredRenderFrame {
    #[must_use]
    pub fn from_stack(
        viewport: Viewport,
        plot: PlotArea,
        stack: &[LayerId],
        initial_opacity: f64,
    ) -> Self {
        let layers = stack
            .iter()
            .map(|&layer| LayerPrimitives {
                layer,
                opacity: initial_opacity,
                lines: Vec::new(),
                paths: Vec::new(),
                texts: Vec::new(),
            })
            .collect();
        Self {
            viewport,
            plot,
            layers,
        }
    }

    pub fn push_line(&mut self, layer: LayerId, line: LinePrimitive) {
        if let Some(target) = self.layer_mut(layer) {
            target.lines.push(line);
        }
    }

    pub fn push_path(&mut self, layer: LayerId, path: PathPrimitive) {
        if let Some(target) = self.layer_mut(layer) {
            target.paths.push(path);
        }
    }

    pub fn push_text(&mut self, layer: LayerId, text: TextPrimitive) {
        if let Some(target) = self.layer_mut(layer) {
            target.texts.push(text);
        }
    }

    /// Sets a layer's opacity, clamped to `[0, 1]`. Returns `false` for unknown layers.
    pub fn set_opacity(&mut self, layer: LayerId, opacity: f64) -> bool {
        match self.layer_mut(layer) {
            Some(target) => {
                target.opacity = opacity.clamp(0.0, 1.0);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn opacity(&self, layer: LayerId) -> Option<f64> {
        self.layer(layer).map(|target| target.opacity)
    }

    #[must_use]
    pub fn layer(&self, layer: LayerId) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|target| target.layer == layer)
    }

    #[must_use]
    pub fn layer_ids(&self) -> Vec<LayerId> {
        self.layers.iter().map(|target| target.layer).collect()
    }

    #[must_use]
    pub fn visible_layer_count(&self) -> usize {
        self.layers
            .iter()
            .filter(|target| target.opacity > 0.0)
            .count()
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.layers.iter().map(LayerPrimitives::primitive_count).sum()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for layer in &self.layers {
            if !layer.opacity.is_finite() || !(0.0..=1.0).contains(&layer.opacity) {
                return Err(ChartError::InvalidData(format!(
                    "layer `{}` opacity must be in [0, 1]",
                    layer.layer
                )));
            }
            for line in &layer.lines {
                line.validate()?;
            }
            for path in &layer.paths {
                path.validate()?;
            }
            for text in &layer.texts {
                text.validate()?;
            }
        }

        Ok(())
    }

    fn layer_mut(&mut self, layer: LayerId) -> Option<&mut LayerPrimitives> {
        self.layers.iter_mut().find(|target| target.layer == layer)
    }
}
