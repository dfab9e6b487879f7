use serde::Serialize;

/// Mean and standard deviation of one column of trial samples.
///
/// The standard deviation is the *sample* estimator (Bessel-corrected,
/// denominator `n - 1`). A single sample has a standard deviation of `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeanStd {
    /// The arithmetic mean of the samples.
    pub mean: f64,
    /// The sample standard deviation of the samples.
    pub std_dev: f64,
}

impl MeanStd {
    /// Computes the mean and sample standard deviation of `values`.
    ///
    /// Values are accumulated in the order given, so the result is bit-identical
    /// for identical input.
    ///
    /// # Returns
    ///
    /// * `Some(MeanStd)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use olplot_stats::descriptive::MeanStd;
    /// let stats = MeanStd::new(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    /// assert_eq!(stats.mean, 3.0);
    /// assert!((stats.std_dev - 1.581_138_830_084_189_8).abs() < 1e-12);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std_dev = sample_variance(values, mean).sqrt();
        Some(Self { mean, std_dev })
    }
}

/// Descriptive statistics summarizing one column of a result file.
///
/// Contains common measures of central tendency and dispersion for a dataset
/// of `f64` values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// Number of samples.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The median value of the dataset (upper median for even counts).
    pub median: f64,
    /// The population variance of the dataset (denominator `n`).
    pub population_variance: f64,
    /// The sample standard deviation of the dataset (denominator `n - 1`).
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// This method will sort a copy of the values before computing statistics.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use olplot_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// assert_eq!(stats.population_variance, 2.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let median = sorted_values[count / 2];
        let population_variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / n;
        let std_dev = sample_variance(sorted_values, mean).sqrt();

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            population_variance,
            std_dev,
        })
    }

    /// Returns the mean and sample standard deviation pair.
    #[must_use]
    pub fn mean_std(&self) -> MeanStd {
        MeanStd {
            mean: self.mean,
            std_dev: self.std_dev,
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn sample_variance(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    sum_sq / (values.len() - 1) as f64
}
