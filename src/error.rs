use thiserror::Error;

use crate::models::{ChartFamily, ChartType};

/// Fatal compiler errors. Everything recoverable (truncation, inverted axis bounds,
/// malformed colors) is handled locally and never reaches this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The chart type does not consume the data family it was handed. This is an
    /// upstream contract violation, not a user data problem.
    #[error("unexpected chart type '{chart_type}' for {family} chart data")]
    UnexpectedChartType {
        chart_type: ChartType,
        family: ChartFamily,
    },
    #[error("unknown chart type '{tag}'")]
    UnknownChartType { tag: String },
}

pub type Result<T> = std::result::Result<T, CompileError>;
