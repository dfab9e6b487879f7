//! Reduction of result columns to mean / standard-deviation pairs
//!
//! The reducer is a pure function of a [`ResultTable`], a list of metric
//! columns and [`ReduceOptions`]. The optional log-transform is applied to
//! every requested column of one call, never to a subset.
//!
//! Standard deviations use the sample estimator (denominator `n - 1`); see
//! [`olplot_stats::descriptive::MeanStd`].

use olplot_stats::{descriptive::MeanStd, transform};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AnalysisError, InvalidReason, SchemaIssue},
    table::ResultTable,
};

/// Ordered list of metric column names to reduce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSet(Vec<String>);

impl MetricSet {
    pub const SCORE: &'static str = "score";
    pub const ACHIEVED_RETURN: &'static str = "achieved_return";
    pub const COMPUTATIONAL_COST: &'static str = "computational_cost";
    pub const NB_CALLS: &'static str = "nb_calls";

    pub fn new<I, S>(metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(metrics.into_iter().map(Into::into).collect())
    }

    /// The single-column set used when summarizing one result file.
    #[must_use]
    pub fn achieved_return() -> Self {
        Self::new([Self::ACHIEVED_RETURN])
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn position(&self, metric: &str) -> Option<usize> {
        self.0.iter().position(|m| m == metric)
    }
}

impl Default for MetricSet {
    /// `score`, `computational_cost`, `nb_calls`
    fn default() -> Self {
        Self::new([Self::SCORE, Self::COMPUTATIONAL_COST, Self::NB_CALLS])
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReduceOptions {
    /// Apply the natural logarithm to every sample before reducing
    #[serde(default)]
    pub log_transform: bool,
}

/// Reduces each metric column of `table` to a mean / standard-deviation pair.
///
/// Output order follows `metrics`.
///
/// # Errors
///
/// - [`AnalysisError::SchemaError`] if a metric column is absent or empty
/// - [`AnalysisError::InvalidValue`] if `log_transform` is set and a sample is not positive
pub fn reduce(
    table: &ResultTable,
    metrics: &MetricSet,
    options: ReduceOptions,
) -> Result<Vec<MeanStd>, AnalysisError> {
    metrics
        .iter()
        .map(|metric| reduce_column(table, metric, options))
        .collect()
}

/// Returns the samples of `metric`, log-transformed when requested.
pub fn prepared_column(
    table: &ResultTable,
    metric: &str,
    options: ReduceOptions,
) -> Result<Vec<f64>, AnalysisError> {
    let samples = table.require_column(metric)?;
    if !options.log_transform {
        return Ok(samples.to_vec());
    }
    transform::ln_positive(samples).map_err(|e| AnalysisError::InvalidValue {
        origin: table.path().display().to_string(),
        column: metric.to_owned(),
        row: e.index + 1,
        value: e.value.to_string(),
        reason: InvalidReason::NonPositiveUnderLog,
    })
}

fn reduce_column(
    table: &ResultTable,
    metric: &str,
    options: ReduceOptions,
) -> Result<MeanStd, AnalysisError> {
    let samples = prepared_column(table, metric, options)?;
    let stats = MeanStd::new(&samples).ok_or_else(|| AnalysisError::SchemaError {
        path: table.path().to_owned(),
        issue: SchemaIssue::NoRows,
    })?;
    ensure_finite(table, metric, stats.mean, stats.std_dev)?;
    Ok(stats)
}

/// Rejects column statistics that overflowed although every sample was finite.
pub(crate) fn ensure_finite(
    table: &ResultTable,
    metric: &str,
    mean: f64,
    std_dev: f64,
) -> Result<(), AnalysisError> {
    if mean.is_finite() && std_dev.is_finite() {
        return Ok(());
    }
    Err(AnalysisError::InvalidValue {
        origin: table.path().display().to_string(),
        column: metric.to_owned(),
        row: 0,
        value: format!("mean {mean}, std {std_dev}"),
        reason: InvalidReason::NotANumber,
    })
}
