//! Baseline comparison
//!
//! Expresses a condition's mean series as a difference against the mean
//! series of a baseline condition, point by point along the sweep axis.
//!
//! Both series must come from the same sweep: identical length and identical
//! x-axis values in identical order. Anything else is rejected with
//! [`AnalysisError::AlignmentError`] instead of producing a silently shifted
//! comparison.

pub use olplot_stats::difference::DifferenceMode;
use olplot_stats::difference::{self, DifferenceError};
use serde::Serialize;

use crate::{
    aggregate::{StatSeries, SweepReport},
    error::{AnalysisError, InvalidReason},
};

/// A condition's mean series expressed against a baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSeries {
    pub condition: String,
    pub baseline: String,
    pub metric: String,
    pub mode: DifferenceMode,
    pub x: Vec<f64>,
    pub values: Vec<f64>,
}

/// Computes the difference of `series` means against `baseline` means.
///
/// `origin` names the compared condition in error messages.
pub fn compare_series(
    origin: &str,
    series: &StatSeries,
    baseline: &StatSeries,
    mode: DifferenceMode,
) -> Result<Vec<f64>, AnalysisError> {
    if series.x != baseline.x {
        return Err(AnalysisError::AlignmentError {
            expected: baseline.x.clone(),
            actual: series.x.clone(),
        });
    }

    difference::difference(&series.means, &baseline.means, mode).map_err(|e| match e {
        DifferenceError::LengthMismatch { .. } => AnalysisError::AlignmentError {
            expected: baseline.x.clone(),
            actual: series.x.clone(),
        },
        DifferenceError::ZeroBaseline { index } => AnalysisError::InvalidValue {
            origin: origin.to_owned(),
            column: baseline.metric.clone(),
            row: index + 1,
            value: baseline.means[index].to_string(),
            reason: InvalidReason::ZeroBaseline,
        },
    })
}

impl SweepReport {
    /// Compares every condition of the report against `baseline` on `metric`.
    ///
    /// The baseline itself is included and compares as all zeros.
    pub fn compare_to_baseline(
        &self,
        baseline: &str,
        metric: &str,
        mode: DifferenceMode,
    ) -> Result<Vec<ComparisonSeries>, AnalysisError> {
        let base = self.require_condition(baseline)?.require_series(metric)?;
        self.conditions
            .iter()
            .map(|condition| {
                let name = &condition.condition.name;
                let series = condition.require_series(metric)?;
                let values = compare_series(name, series, base, mode)?;
                Ok(ComparisonSeries {
                    condition: name.clone(),
                    baseline: baseline.to_owned(),
                    metric: metric.to_owned(),
                    mode,
                    x: series.x.clone(),
                    values,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        aggregate::ConditionSeries,
        reduce::{MetricSet, ReduceOptions},
        sweep::{Condition, SweepParameter, TokenEncoding},
    };

    fn series(x: &[f64], means: &[f64]) -> StatSeries {
        StatSeries {
            metric: "score".to_owned(),
            x: x.to_vec(),
            means: means.to_vec(),
            std_devs: vec![0.0; means.len()],
        }
    }

    #[test]
    fn test_self_comparison_is_zero() {
        let s = series(&[0.0, 0.05, 0.1], &[40.0, 55.5, 71.25]);
        for mode in [DifferenceMode::Absolute, DifferenceMode::Relative] {
            let values = compare_series("uct", &s, &s, mode).unwrap();
            assert_eq!(values, [0.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_relative_and_absolute() {
        let baseline = series(&[0.0, 0.5], &[10.0, 40.0]);
        let other = series(&[0.0, 0.5], &[15.0, 30.0]);
        assert_eq!(
            compare_series("olta", &other, &baseline, DifferenceMode::Relative).unwrap(),
            [0.5, -0.25]
        );
        assert_eq!(
            compare_series("olta", &other, &baseline, DifferenceMode::Absolute).unwrap(),
            [5.0, -10.0]
        );
    }

    #[test]
    fn test_length_mismatch_is_alignment_error() {
        let baseline = series(&[0.0, 0.05, 0.1], &[1.0, 2.0, 3.0]);
        let other = series(&[0.0, 0.05], &[1.0, 2.0]);
        let err = compare_series("olta", &other, &baseline, DifferenceMode::Relative).unwrap_err();
        assert!(matches!(err, AnalysisError::AlignmentError { .. }));
    }

    #[test]
    fn test_shifted_axis_is_alignment_error() {
        let baseline = series(&[0.0, 0.05], &[1.0, 2.0]);
        let other = series(&[0.05, 0.0], &[2.0, 1.0]);
        let err = compare_series("olta", &other, &baseline, DifferenceMode::Absolute).unwrap_err();
        assert!(matches!(err, AnalysisError::AlignmentError { .. }));
    }

    #[test]
    fn test_zero_baseline() {
        let baseline = series(&[0.0, 0.05], &[1.0, 0.0]);
        let other = series(&[0.0, 0.05], &[1.0, 2.0]);
        let err = compare_series("olta", &other, &baseline, DifferenceMode::Relative).unwrap_err();
        match err {
            AnalysisError::InvalidValue {
                origin,
                row,
                reason,
                ..
            } => {
                assert_eq!(origin, "olta");
                assert_eq!(row, 2);
                assert_eq!(reason, InvalidReason::ZeroBaseline);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_compare_report() {
        let sweep = SweepParameter::from_values(&[0.0, 0.5], TokenEncoding::Percent).unwrap();
        let report = SweepReport {
            sweep,
            metrics: MetricSet::new(["score"]),
            options: ReduceOptions::default(),
            conditions: vec![
                ConditionSeries {
                    condition: Condition::new("oluct", "oluct"),
                    series: vec![series(&[0.0, 0.5], &[10.0, 20.0])],
                },
                ConditionSeries {
                    condition: Condition::new("olta0", "olta0"),
                    series: vec![series(&[0.0, 0.5], &[5.0, 30.0])],
                },
            ],
        };

        let comparison = report
            .compare_to_baseline("oluct", "score", DifferenceMode::Relative)
            .unwrap();
        assert_eq!(comparison.len(), 2);
        assert_eq!(comparison[0].condition, "oluct");
        assert_eq!(comparison[0].values, [0.0, 0.0]);
        assert_eq!(comparison[1].condition, "olta0");
        assert_eq!(comparison[1].values, [-0.5, 0.5]);
        assert_eq!(comparison[1].x, [0.0, 0.5]);

        assert!(matches!(
            report.compare_to_baseline("uct", "score", DifferenceMode::Relative),
            Err(AnalysisError::UnknownCondition { .. })
        ));
        assert!(matches!(
            report.compare_to_baseline("oluct", "nb_calls", DifferenceMode::Relative),
            Err(AnalysisError::UnknownMetric { .. })
        ));
    }
}
