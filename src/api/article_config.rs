use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Margins, Viewport};
use crate::data::{DataSources, DatasetColumns, NumericPolicy};
use crate::error::{ChartError, ChartResult};

use super::{BrandPalette, ChartKind};

/// Geometry shared by all chart builders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub margins: Margins,
    pub series_stroke_width: f64,
    /// Legend origin relative to the plot's top-right corner.
    pub legend_offset_x: f64,
    pub legend_offset_y: f64,
    pub legend_row_spacing: f64,
    pub legend_swatch_width: f64,
    pub legend_font_px: f64,
    /// Horizontal gap between a series' last point and its end label.
    pub end_label_offset_px: f64,
    pub end_label_font_px: f64,
    pub axis_font_px: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            series_stroke_width: 3.0,
            legend_offset_x: 20.0,
            legend_offset_y: 20.0,
            legend_row_spacing: 25.0,
            legend_swatch_width: 30.0,
            legend_font_px: 13.0,
            end_label_offset_px: 5.0,
            end_label_font_px: 14.0,
            axis_font_px: 12.0,
        }
    }
}

impl ChartLayout {
    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("margins.top", self.margins.top),
            ("margins.right", self.margins.right),
            ("margins.bottom", self.margins.bottom),
            ("margins.left", self.margins.left),
            ("legend_row_spacing", self.legend_row_spacing),
            ("legend_swatch_width", self.legend_swatch_width),
            ("end_label_offset_px", self.end_label_offset_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "layout `{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("series_stroke_width", self.series_stroke_width),
            ("legend_font_px", self.legend_font_px),
            ("end_label_font_px", self.end_label_font_px),
            ("axis_font_px", self.axis_font_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "layout `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Text placed inside the budget band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    pub year: i32,
    pub text: String,
    pub font_px: f64,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            year: 2020,
            text: "€9,5 mrd extra".to_owned(),
            font_px: 18.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetChartOptions {
    /// Lower bound of the value axis, in thousands of euros.
    pub value_floor: f64,
    pub headroom: f64,
    pub band_fill_opacity: f64,
    pub annotation: AnnotationConfig,
}

impl Default for BudgetChartOptions {
    fn default() -> Self {
        Self {
            value_floor: 5_000_000.0,
            headroom: 1.05,
            band_fill_opacity: 0.2,
            annotation: AnnotationConfig::default(),
        }
    }
}

/// Value-axis options for the charts that start at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZeroBasedChartOptions {
    pub headroom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartViewports {
    pub budget: Viewport,
    pub crime: Viewport,
    pub clearance: Viewport,
}

impl Default for ChartViewports {
    fn default() -> Self {
        let viewport = Viewport::new(900, 520);
        Self {
            budget: viewport,
            crime: viewport,
            clearance: viewport,
        }
    }
}

impl ChartViewports {
    #[must_use]
    pub fn get(&self, kind: ChartKind) -> Viewport {
        match kind {
            ChartKind::Budget => self.budget,
            ChartKind::Crime => self.crime,
            ChartKind::Clearance => self.clearance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Fraction of the viewport height where the step trigger line sits.
    pub offset: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { offset: 0.7 }
    }
}

/// Complete article setup.
///
/// Serializable so hosts can keep it next to the datasets as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleConfig {
    pub data: DataSources,
    pub columns: DatasetColumns,
    pub numeric_policy: NumericPolicy,
    pub palette: BrandPalette,
    pub layout: ChartLayout,
    pub viewports: ChartViewports,
    pub budget: BudgetChartOptions,
    pub crime: ZeroBasedChartOptions,
    pub clearance: ZeroBasedChartOptions,
    pub scroll: ScrollConfig,
}

impl Default for ArticleConfig {
    fn default() -> Self {
        Self {
            data: DataSources::default(),
            columns: DatasetColumns::default(),
            numeric_policy: NumericPolicy::default(),
            palette: BrandPalette::default(),
            layout: ChartLayout::default(),
            viewports: ChartViewports::default(),
            budget: BudgetChartOptions::default(),
            crime: ZeroBasedChartOptions { headroom: 1.1 },
            clearance: ZeroBasedChartOptions { headroom: 1.2 },
            scroll: ScrollConfig::default(),
        }
    }
}

impl ArticleConfig {
    pub fn from_json_str(raw: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config; relative data paths resolve against the file's directory.
    pub fn load(path: &Path) -> ChartResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ChartError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json_str(&raw)?;
        if let Some(dir) = path.parent() {
            config.data = config.data.relative_to(dir);
        }
        Ok(config)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.palette.validate()?;
        self.layout.validate()?;
        for kind in ChartKind::ALL {
            let viewport = self.viewports.get(kind);
            if !viewport.is_valid() {
                return Err(ChartError::InvalidViewport {
                    width: viewport.width,
                    height: viewport.height,
                });
            }
        }
        for (name, headroom) in [
            ("budget", self.budget.headroom),
            ("crime", self.crime.headroom),
            ("clearance", self.clearance.headroom),
        ] {
            if !headroom.is_finite() || headroom <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} headroom must be finite and > 0"
                )));
            }
        }
        if !self.budget.value_floor.is_finite() {
            return Err(ChartError::InvalidData(
                "budget value floor must be finite".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&self.budget.band_fill_opacity) {
            return Err(ChartError::InvalidData(
                "budget band fill opacity must be in [0, 1]".to_owned(),
            ));
        }
        if !self.scroll.offset.is_finite() || !(0.0..=1.0).contains(&self.scroll.offset) {
            return Err(ChartError::InvalidData(
                "scroll offset must be in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ArticleConfig;

    #[test]
    fn empty_json_yields_defaults() {
        let config = ArticleConfig::from_json_str("{}").expect("config");
        assert_eq!(config, ArticleConfig::default());
        assert_eq!(config.crime.headroom, 1.1);
        assert_eq!(config.clearance.headroom, 1.2);
    }

    #[test]
    fn out_of_range_scroll_offset_is_rejected() {
        assert!(ArticleConfig::from_json_str(r#"{"scroll":{"offset":1.5}}"#).is_err());
    }

    #[test]
    fn zero_sized_chart_container_is_rejected() {
        let raw = r#"{"viewports":{"crime":{"width":0,"height":400}}}"#;
        assert!(ArticleConfig::from_json_str(raw).is_err());
    }
}
