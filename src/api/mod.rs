//! Chart builders, reveal sequencing and the article orchestrator.

mod article;
mod article_config;
mod axis_label_format;
mod axis_ticks;
mod budget_chart;
mod chart_handle;
mod chart_scene_builder;
mod clearance_chart;
mod crime_chart;
mod palette;
mod reveal_table;
mod scroll;
mod sequencer;
mod transition;

pub use article::{Article, ArticleSnapshot, ChartSnapshot};
pub use article_config::{
    AnnotationConfig, ArticleConfig, BudgetChartOptions, ChartLayout, ChartViewports,
    ScrollConfig, ZeroBasedChartOptions,
};
pub use axis_label_format::{LabelLocale, ValueFormat, format_decimal, format_year_label};
pub use budget_chart::build_budget_chart;
pub use chart_handle::{ChartBuildContext, ChartHandle, ChartKind, EndLabel, SeriesLayer};
pub use clearance_chart::build_clearance_chart;
pub use crime_chart::build_crime_chart;
pub use palette::BrandPalette;
pub use reveal_table::{
    RevealState, RevealStep, RevealTable, reveal_state, revealable_layers, transition_duration_ms,
};
pub use scroll::{ScrollDirection, StepBox, StepEvent, StepEvents, StepObserver};
pub use sequencer::{RevealSequencer, StartedLayers, StepOutcome};
pub use transition::{Easing, OpacityTransition};
