//! Statistical reductions for experiment result columns.
//!
//! This crate provides the pure numeric building blocks used to summarize
//! per-trial result columns:
//!
//! - **Descriptive statistics**: mean, sample standard deviation, min, max, median
//! - **Transforms**: elementwise natural logarithm that rejects non-positive samples
//! - **Differences**: absolute or relative difference of a series against a baseline
//!
//! # Standard deviation convention
//!
//! Every standard deviation reported by this crate is the *sample* estimator
//! (denominator `n - 1`). A dataset of one value has a standard deviation of
//! `0.0`. The population variance is available on [`descriptive::DescriptiveStats`]
//! for reporting only.
//!
//! # Modules
//!
//! - [`descriptive`]: Mean/std-dev pairs and descriptive summaries
//! - [`transform`]: Log transform of positive samples
//! - [`difference`]: Baseline-relative series differences
//!
//! # Examples
//!
//! ## Reducing a column
//!
//! ```
//! use olplot_stats::descriptive::MeanStd;
//!
//! let stats = MeanStd::new(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Reducing a log-transformed column
//!
//! ```
//! use olplot_stats::{descriptive::MeanStd, transform::ln_positive};
//!
//! let logged = ln_positive(&[1.0, 1.0, 1.0]).unwrap();
//! let stats = MeanStd::new(&logged).unwrap();
//! assert_eq!(stats.mean, 0.0);
//! assert_eq!(stats.std_dev, 0.0);
//! ```
//!
//! ## Comparing against a baseline
//!
//! ```
//! use olplot_stats::difference::{difference, DifferenceMode};
//!
//! let rel = difference(&[12.0], &[10.0], DifferenceMode::Relative).unwrap();
//! assert!((rel[0] - 0.2).abs() < 1e-12);
//! ```

pub mod descriptive;
pub mod difference;
pub mod transform;
