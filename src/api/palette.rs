use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::render::Color;

/// Brand color table shared by the three chart builders.
///
/// Passed by reference at construction; nothing reads colors from global state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandPalette {
    pub primary: Color,
    pub secondary: Color,
    pub tertiary: Color,
    pub accent: Color,
    pub dark: Color,
    pub offwhite: Color,
    pub dove_grey: Color,
    pub brown_red: Color,
    pub blue: Color,
}

impl Default for BrandPalette {
    fn default() -> Self {
        Self {
            primary: Color::rgb8(0xFF, 0x57, 0x25),
            secondary: Color::rgb8(0x70, 0x6F, 0x5F),
            tertiary: Color::rgb8(0xA4, 0x9B, 0x93),
            accent: Color::rgb8(0xB4, 0x85, 0x59),
            dark: Color::rgb8(0x00, 0x00, 0x00),
            offwhite: Color::rgb8(0xF5, 0xF1, 0xED),
            dove_grey: Color::rgb8(0x20, 0x49, 0x51),
            brown_red: Color::rgb8(0xB4, 0x3C, 0x09),
            blue: Color::rgb8(0x00, 0x68, 0xAF),
        }
    }
}

impl BrandPalette {
    /// Faint stroke used for horizontal grid lines.
    #[must_use]
    pub fn grid_line(&self) -> Color {
        Color {
            alpha: 0.35,
            ..self.tertiary
        }
    }

    /// Stroke and text color for axis lines, ticks and legend text.
    #[must_use]
    pub fn axis(&self) -> Color {
        self.dove_grey
    }

    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.primary,
            self.secondary,
            self.tertiary,
            self.accent,
            self.dark,
            self.offwhite,
            self.dove_grey,
            self.brown_red,
            self.blue,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}
