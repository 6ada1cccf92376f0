use thiserror::Error;

use crate::core::ChartKind;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("configuration error: data or datasets are required to render a {kind} chart")]
    Configuration { kind: ChartKind },

    #[error("configuration error: both data and datasets are set for a {kind} chart")]
    AmbiguousDataSource { kind: ChartKind },

    #[error("invalid plugin: {0}")]
    InvalidPlugin(String),

    #[error("chart backend failure: {0}")]
    Backend(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
