//! Single-file summaries
//!
//! Summarizes the columns of one result file without any sweep, e.g. to
//! check the achieved return of a handful of ad-hoc runs.

use std::path::{Path, PathBuf};

use olplot_stats::descriptive::DescriptiveStats;
use serde::Serialize;

use crate::{
    error::{AnalysisError, SchemaIssue},
    reduce::{self, MetricSet, ReduceOptions},
    table::ResultTable,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub metric: String,
    pub stats: DescriptiveStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub log_transform: bool,
    pub columns: Vec<ColumnSummary>,
}

/// Loads `path` and summarizes each metric column.
pub fn summarize_file<P>(
    path: P,
    metrics: &MetricSet,
    options: ReduceOptions,
) -> Result<FileSummary, AnalysisError>
where
    P: AsRef<Path>,
{
    let table = ResultTable::load(path, metrics.as_slice())?;
    summarize_table(&table, metrics, options)
}

pub fn summarize_table(
    table: &ResultTable,
    metrics: &MetricSet,
    options: ReduceOptions,
) -> Result<FileSummary, AnalysisError> {
    let columns = metrics
        .iter()
        .map(|metric| {
            let samples = reduce::prepared_column(table, metric, options)?;
            let stats =
                DescriptiveStats::new(samples).ok_or_else(|| AnalysisError::SchemaError {
                    path: table.path().to_owned(),
                    issue: SchemaIssue::NoRows,
                })?;
            reduce::ensure_finite(table, metric, stats.mean, stats.std_dev)?;
            Ok(ColumnSummary {
                metric: metric.to_owned(),
                stats,
            })
        })
        .collect::<Result<Vec<_>, AnalysisError>>()?;

    Ok(FileSummary {
        path: table.path().to_owned(),
        rows: table.rows(),
        log_transform: options.log_transform,
        columns,
    })
}
