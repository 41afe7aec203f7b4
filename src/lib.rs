//! scrolly-charts: headless engine for a scroll-driven data article.
//!
//! Three CSV datasets become three layered chart scenes whose layers are
//! revealed step by step as the reader scrolls. Rendering goes through the
//! backend-agnostic `render` module; time is always passed in explicitly.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{Article, ArticleConfig, ChartHandle, ChartKind, RevealSequencer, StepObserver};
pub use error::{ChartError, ChartResult};
