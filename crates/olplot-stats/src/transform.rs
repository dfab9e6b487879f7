/// A sample that cannot be log-transformed.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
#[display("sample {value} at index {index} is not positive")]
pub struct NonPositiveSample {
    /// Position of the offending sample.
    pub index: usize,
    /// The offending sample.
    pub value: f64,
}

/// Applies the natural logarithm to every sample.
///
/// Fails on the first sample that is zero, negative or `NaN` instead of
/// silently producing `-inf` or `NaN`.
///
/// # Examples
///
/// ```
/// use olplot_stats::transform::ln_positive;
///
/// let logged = ln_positive(&[1.0, std::f64::consts::E]).unwrap();
/// assert_eq!(logged[0], 0.0);
/// assert!((logged[1] - 1.0).abs() < 1e-12);
///
/// let err = ln_positive(&[1.0, 0.0]).unwrap_err();
/// assert_eq!(err.index, 1);
/// ```
pub fn ln_positive(values: &[f64]) -> Result<Vec<f64>, NonPositiveSample> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if value.is_nan() || value <= 0.0 {
                return Err(NonPositiveSample { index, value });
            }
            Ok(value.ln())
        })
        .collect()
}
