use serde::{Deserialize, Serialize};

/// How a series is expressed against a baseline series.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceMode {
    /// `value - baseline`
    Absolute,
    /// `(value - baseline) / baseline`
    #[default]
    Relative,
}

/// Error returned by [`difference`].
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum DifferenceError {
    #[display("series length {actual} does not match baseline length {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    #[display("baseline value at position {index} is zero")]
    ZeroBaseline { index: usize },
}

/// Computes the element-by-element difference of `values` against `baseline`.
///
/// Both slices must describe the same sweep positions in the same order. In
/// [`DifferenceMode::Relative`] mode a zero baseline value is rejected rather
/// than producing an infinite or `NaN` result.
///
/// # Examples
///
/// ```
/// use olplot_stats::difference::{difference, DifferenceMode};
///
/// let baseline = [10.0, 20.0];
/// let values = [15.0, 10.0];
/// assert_eq!(difference(&values, &baseline, DifferenceMode::Absolute).unwrap(), [5.0, -10.0]);
/// assert_eq!(difference(&values, &baseline, DifferenceMode::Relative).unwrap(), [0.5, -0.5]);
/// ```
pub fn difference(
    values: &[f64],
    baseline: &[f64],
    mode: DifferenceMode,
) -> Result<Vec<f64>, DifferenceError> {
    if values.len() != baseline.len() {
        return Err(DifferenceError::LengthMismatch {
            expected: baseline.len(),
            actual: values.len(),
        });
    }

    values
        .iter()
        .zip(baseline)
        .enumerate()
        .map(|(index, (&value, &base))| match mode {
            DifferenceMode::Absolute => Ok(value - base),
            DifferenceMode::Relative => {
                if base == 0.0 {
                    Err(DifferenceError::ZeroBaseline { index })
                } else {
                    Ok((value - base) / base)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_difference_is_zero() {
        let series = [3.0, 0.25, 1e6, -7.5];
        for mode in [DifferenceMode::Absolute, DifferenceMode::Relative] {
            let diff = difference(&series, &series, mode).unwrap();
            assert_eq!(diff, vec![0.0; series.len()]);
        }
    }

    #[test]
    fn test_length_mismatch() {
        let err = difference(&[1.0, 2.0], &[1.0], DifferenceMode::Absolute).unwrap_err();
        assert_eq!(
            err,
            DifferenceError::LengthMismatch {
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn test_zero_baseline_relative() {
        let err = difference(&[1.0, 2.0], &[1.0, 0.0], DifferenceMode::Relative).unwrap_err();
        assert_eq!(err, DifferenceError::ZeroBaseline { index: 1 });

        // absolute mode has no such restriction
        let diff = difference(&[1.0, 2.0], &[1.0, 0.0], DifferenceMode::Absolute).unwrap();
        assert_eq!(diff, vec![0.0, 2.0]);
    }

    #[test]
    fn test_empty_series() {
        let diff = difference(&[], &[], DifferenceMode::Relative).unwrap();
        assert!(diff.is_empty());
    }
}
