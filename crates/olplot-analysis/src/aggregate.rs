//! Sweep aggregation
//!
//! The aggregator walks every condition across every sweep point, loading
//! one result file per pair and reducing it to mean / standard-deviation
//! pairs. Results are collected into per-condition series indexed by sweep
//! position.
//!
//! # Ordering
//!
//! Series follow the sweep's declared order and conditions keep their
//! declared order. Nothing is sorted or read from directory listings.
//!
//! # Failure policy
//!
//! The first failing (condition, sweep point) aborts the aggregation. The
//! error is wrapped in [`AnalysisError::Aggregate`] naming the condition and
//! the sweep token. No shortened series is ever returned, since it would no
//! longer line up with the sweep axis.
//!
//! # Examples
//!
//! ```no_run
//! use olplot_analysis::{
//!     aggregate::Aggregator,
//!     reduce::{MetricSet, ReduceOptions},
//!     sweep::{Condition, SweepParameter, TokenEncoding},
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let sweep = SweepParameter::from_values(&[0.0, 0.05, 0.1], TokenEncoding::Percent)?;
//! let conditions = vec![Condition::new("uct", "uct"), Condition::new("oluct0", "oluct0")];
//!
//! let aggregator = Aggregator::new("data/backup/continuous", sweep, MetricSet::default())
//!     .with_options(ReduceOptions { log_transform: false });
//! let report = aggregator.aggregate(&conditions)?;
//!
//! for condition in &report.conditions {
//!     let score = condition.series("score").unwrap();
//!     println!("{}: {:?}", condition.condition.name, score.means);
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use olplot_stats::descriptive::MeanStd;
use serde::Serialize;

use crate::{
    error::AnalysisError,
    reduce::{self, MetricSet, ReduceOptions},
    sweep::{Condition, SweepParameter},
    table::ResultTable,
};

/// Mean and standard-deviation series of one metric for one condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatSeries {
    pub metric: String,
    /// Sweep values, in declared sweep order
    pub x: Vec<f64>,
    pub means: Vec<f64>,
    pub std_devs: Vec<f64>,
}

impl StatSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterates over `(x, mean, std_dev)` triples.
    #[must_use]
    pub fn points(&self) -> impl DoubleEndedIterator<Item = (f64, f64, f64)> + '_ {
        self.x
            .iter()
            .zip(&self.means)
            .zip(&self.std_devs)
            .map(|((&x, &mean), &std_dev)| (x, mean, std_dev))
    }

    /// Lower and upper ends of the ±std band, over all points.
    #[must_use]
    pub fn band_range(&self) -> Option<(f64, f64)> {
        self.means
            .iter()
            .zip(&self.std_devs)
            .map(|(m, s)| (m - s, m + s))
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
    }
}

/// All metric series of one condition, in metric declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionSeries {
    pub condition: Condition,
    pub series: Vec<StatSeries>,
}

impl ConditionSeries {
    #[must_use]
    pub fn series(&self, metric: &str) -> Option<&StatSeries> {
        self.series.iter().find(|s| s.metric == metric)
    }

    pub fn require_series(&self, metric: &str) -> Result<&StatSeries, AnalysisError> {
        self.series(metric)
            .ok_or_else(|| AnalysisError::UnknownMetric {
                condition: self.condition.name.clone(),
                metric: metric.to_owned(),
            })
    }
}

/// Output of one aggregation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub sweep: SweepParameter,
    pub metrics: MetricSet,
    pub options: ReduceOptions,
    pub conditions: Vec<ConditionSeries>,
}

impl SweepReport {
    #[must_use]
    pub fn condition(&self, name: &str) -> Option<&ConditionSeries> {
        self.conditions.iter().find(|c| c.condition.name == name)
    }

    pub fn require_condition(&self, name: &str) -> Result<&ConditionSeries, AnalysisError> {
        self.condition(name)
            .ok_or_else(|| AnalysisError::UnknownCondition {
                name: name.to_owned(),
            })
    }
}

/// Runs loader and reducer over every (condition, sweep point) pair.
#[derive(Debug, Clone)]
pub struct Aggregator {
    root: PathBuf,
    sweep: SweepParameter,
    metrics: MetricSet,
    options: ReduceOptions,
}

impl Aggregator {
    pub fn new<P>(root: P, sweep: SweepParameter, metrics: MetricSet) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            root: root.into(),
            sweep,
            metrics,
            options: ReduceOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ReduceOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn sweep(&self) -> &SweepParameter {
        &self.sweep
    }

    /// Aggregates every condition, aborting on the first failure.
    pub fn aggregate(&self, conditions: &[Condition]) -> Result<SweepReport, AnalysisError> {
        let conditions = conditions
            .iter()
            .map(|condition| self.aggregate_condition(condition))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SweepReport {
            sweep: self.sweep.clone(),
            metrics: self.metrics.clone(),
            options: self.options,
            conditions,
        })
    }

    /// Aggregates one condition over the whole sweep.
    pub fn aggregate_condition(
        &self,
        condition: &Condition,
    ) -> Result<ConditionSeries, AnalysisError> {
        tracing::info!(
            condition = %condition.name,
            points = self.sweep.len(),
            log_transform = self.options.log_transform,
            "aggregating condition"
        );

        // rows[i][m] is the reduction of metric m at sweep point i
        let rows = self
            .sweep
            .points()
            .iter()
            .map(|point| {
                let path = condition.result_path(&self.root, point);
                tracing::debug!(
                    condition = %condition.name,
                    token = %point.token,
                    path = %path.display(),
                    "reducing sweep point"
                );
                self.load_and_reduce(&path)
                    .map_err(|source| AnalysisError::Aggregate {
                        condition: condition.name.clone(),
                        token: point.token.clone(),
                        source: Box::new(source),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let x = self.sweep.values();
        let series = self
            .metrics
            .iter()
            .enumerate()
            .map(|(m, metric)| StatSeries {
                metric: metric.to_owned(),
                x: x.clone(),
                means: rows.iter().map(|row| row[m].mean).collect(),
                std_devs: rows.iter().map(|row| row[m].std_dev).collect(),
            })
            .collect();

        Ok(ConditionSeries {
            condition: condition.clone(),
            series,
        })
    }

    fn load_and_reduce(&self, path: &Path) -> Result<Vec<MeanStd>, AnalysisError> {
        let table = ResultTable::load(path, self.metrics.as_slice())?;
        reduce::reduce(&table, &self.metrics, self.options)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::{error::InvalidReason, sweep::TokenEncoding};

    fn write_result(dir: &Path, name: &str, rows: &[(f64, f64, f64)]) {
        let mut content = String::from("score,achieved_return,computational_cost,nb_calls\n");
        for (score, cost, calls) in rows {
            content.push_str(&format!("{score},0,{cost},{calls}\n"));
        }
        fs::write(dir.join(name), content).unwrap();
    }

    fn sweep() -> SweepParameter {
        SweepParameter::from_values(&[0.0, 0.05, 0.1], TokenEncoding::Percent).unwrap()
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        for (token, offset) in [("0", 0.0), ("5", 10.0), ("10", 20.0)] {
            write_result(
                dir.path(),
                &format!("uct{token}.csv"),
                &[
                    (1.0 + offset, 10.0, 1.0),
                    (2.0 + offset, 10.0, 1.0),
                    (3.0 + offset, 10.0, 1.0),
                ],
            );
            write_result(
                dir.path(),
                &format!("oluct{token}.csv"),
                &[(2.0 + offset, 20.0, 4.0), (4.0 + offset, 40.0, 4.0)],
            );
        }
        dir
    }

    #[test]
    fn test_series_follow_sweep_order() {
        let dir = fixture();
        let aggregator = Aggregator::new(dir.path(), sweep(), MetricSet::default());
        let report = aggregator
            .aggregate(&[Condition::new("uct", "uct"), Condition::new("oluct", "oluct")])
            .unwrap();

        assert_eq!(report.conditions.len(), 2);
        assert_eq!(report.conditions[0].condition.name, "uct");
        assert_eq!(report.conditions[1].condition.name, "oluct");

        for condition in &report.conditions {
            assert_eq!(condition.series.len(), 3);
            for series in &condition.series {
                assert_eq!(series.len(), report.sweep.len());
                assert_eq!(series.x, [0.0, 0.05, 0.1]);
            }
        }

        let score = report.condition("uct").unwrap().series("score").unwrap();
        assert_eq!(score.means, [2.0, 12.0, 22.0]);
        assert_eq!(score.std_devs, [1.0, 1.0, 1.0]);

        let cost = report
            .condition("oluct")
            .unwrap()
            .series("computational_cost")
            .unwrap();
        assert_eq!(cost.means, [30.0, 30.0, 30.0]);
    }

    #[test]
    fn test_declared_order_is_not_sorted() {
        let dir = fixture();
        let reversed = SweepParameter::from_tokens_and_values(&["10", "0", "5"], &[0.1, 0.0, 0.05])
            .unwrap();
        let aggregator = Aggregator::new(dir.path(), reversed, MetricSet::default());
        let series = aggregator
            .aggregate_condition(&Condition::new("uct", "uct"))
            .unwrap();
        let score = series.series("score").unwrap();
        assert_eq!(score.x, [0.1, 0.0, 0.05]);
        assert_eq!(score.means, [22.0, 2.0, 12.0]);
    }

    #[test]
    fn test_missing_file_aborts_with_sweep_token() {
        let dir = fixture();
        fs::remove_file(dir.path().join("oluct5.csv")).unwrap();

        let aggregator = Aggregator::new(dir.path(), sweep(), MetricSet::default());
        let err = aggregator
            .aggregate(&[Condition::new("uct", "uct"), Condition::new("oluct", "oluct")])
            .unwrap_err();

        match &err {
            AnalysisError::Aggregate {
                condition, token, ..
            } => {
                assert_eq!(condition, "oluct");
                assert_eq!(token, "5");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            err.root_cause(),
            AnalysisError::FileNotFound { .. }
        ));
    }

    #[test]
    fn test_log_failure_aborts_condition() {
        let dir = fixture();
        write_result(dir.path(), "uct10.csv", &[(0.0, 10.0, 1.0), (1.0, 10.0, 1.0)]);

        let aggregator = Aggregator::new(dir.path(), sweep(), MetricSet::default())
            .with_options(ReduceOptions {
                log_transform: true,
            });
        let err = aggregator
            .aggregate_condition(&Condition::new("uct", "uct"))
            .unwrap_err();
        assert!(matches!(
            &err,
            AnalysisError::Aggregate { token, .. } if token == "10"
        ));
        assert!(matches!(
            err.root_cause(),
            AnalysisError::InvalidValue {
                reason: InvalidReason::NonPositiveUnderLog,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_lookups() {
        let dir = fixture();
        let aggregator = Aggregator::new(dir.path(), sweep(), MetricSet::new(["score"]));
        let report = aggregator
            .aggregate(&[Condition::new("uct", "uct")])
            .unwrap();
        assert!(matches!(
            report.require_condition("olta"),
            Err(AnalysisError::UnknownCondition { .. })
        ));
        assert!(matches!(
            report.conditions[0].require_series("nb_calls"),
            Err(AnalysisError::UnknownMetric { .. })
        ));
    }

    #[test]
    fn test_band_range() {
        let series = StatSeries {
            metric: "score".to_owned(),
            x: vec![0.0, 1.0],
            means: vec![2.0, 5.0],
            std_devs: vec![1.0, 0.5],
        };
        assert_eq!(series.band_range(), Some((1.0, 5.5)));
        assert_eq!(
            series.points().collect::<Vec<_>>(),
            [(0.0, 2.0, 1.0), (1.0, 5.0, 0.5)]
        );
    }
}
