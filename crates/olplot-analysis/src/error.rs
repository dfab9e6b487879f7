use std::{io, path::PathBuf};

/// Errors raised while loading, reducing and aggregating result files.
///
/// None of these are recovered internally: each one points at a malformed
/// input that has to be fixed before rerunning.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("result file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[display("failed to read {}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[display("{}: {issue}", path.display())]
    SchemaError {
        path: PathBuf,
        issue: SchemaIssue,
    },

    #[display("{origin}: invalid value `{value}` in column `{column}` at row {row}: {reason}")]
    InvalidValue {
        /// File path or condition name the value came from
        origin: String,
        column: String,
        /// 1-based data row, 1-based sweep position for series values, or 0
        /// when a statistic over the whole column is at fault
        row: usize,
        value: String,
        reason: InvalidReason,
    },

    #[display("sweep axis {actual:?} does not match baseline sweep axis {expected:?}")]
    AlignmentError { expected: Vec<f64>, actual: Vec<f64> },

    #[display("unknown condition `{name}`")]
    UnknownCondition { name: String },

    #[display("metric `{metric}` was not reduced for condition `{condition}`")]
    UnknownMetric { condition: String, metric: String },

    #[display("{}: invalid world: {reason}", path.display())]
    InvalidWorld { path: PathBuf, reason: String },

    #[display("condition `{condition}` failed at sweep value `{token}`")]
    Aggregate {
        condition: String,
        token: String,
        source: Box<AnalysisError>,
    },
}

impl AnalysisError {
    /// Returns the innermost error, looking through aggregation context.
    #[must_use]
    pub fn root_cause(&self) -> &AnalysisError {
        match self {
            AnalysisError::Aggregate { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// What is wrong with the shape of a result file.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SchemaIssue {
    #[display("missing column `{_0}`")]
    MissingColumn(String),
    #[display("no data rows")]
    NoRows,
    #[display("malformed CSV: {_0}")]
    Malformed(String),
}

/// Why a single value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InvalidReason {
    #[display("not a finite number")]
    NotANumber,
    #[display("log-transform requires a positive value")]
    NonPositiveUnderLog,
    #[display("relative difference against a zero baseline")]
    ZeroBaseline,
}
