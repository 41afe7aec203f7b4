use std::path::PathBuf;

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("dataset `{dataset}` has no records")]
    EmptyDataset { dataset: &'static str },

    #[error("dataset `{dataset}` is missing required column `{column}`")]
    MissingColumn {
        dataset: &'static str,
        column: String,
    },

    #[error("dataset `{dataset}` line {line}: column `{column}` has malformed number `{value}`")]
    MalformedNumber {
        dataset: &'static str,
        line: usize,
        column: String,
        value: String,
    },

    #[error("chart `{chart}` has no step {step} (steps: 0..{step_count})")]
    UnknownStep {
        chart: &'static str,
        step: usize,
        step_count: usize,
    },

    #[error("failed to load `{}`: {source}", path.display())]
    DataLoad {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("io error on `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
