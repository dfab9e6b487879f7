//! Aggregation of planning-experiment results
//!
//! This crate loads the per-trial result files written by planning
//! experiments (UCT / OLUCT / OLTA variants run over a sweep of transition
//! misstep probabilities), reduces them to mean / standard-deviation series
//! and compares conditions against a baseline.
//!
//! # Overview
//!
//! 1. **Describe the experiment** ([`sweep::SweepParameter`], [`sweep::Condition`]):
//!    the ordered sweep values and the conditions being compared
//! 2. **Load result files** ([`table::ResultTable`]): one CSV per
//!    (condition, sweep value)
//! 3. **Reduce columns** ([`reduce::reduce`]): mean and sample standard
//!    deviation per metric, optionally log-transformed
//! 4. **Aggregate the sweep** ([`aggregate::Aggregator`]): one
//!    [`aggregate::StatSeries`] per (condition, metric), in sweep order
//! 5. **Compare to a baseline** ([`compare`]): absolute or relative
//!    difference of mean series
//!
//! [`summary`] covers single files without a sweep and [`world`] describes
//! the 2D worlds and agent trajectories of individual runs.
//!
//! # Errors
//!
//! Every operation returns [`error::AnalysisError`]. Aggregation never skips
//! a failing sweep point; the whole run is aborted and the error names the
//! condition and sweep token.
//!
//! # Examples
//!
//! ```no_run
//! use olplot_analysis::{
//!     aggregate::Aggregator,
//!     compare::DifferenceMode,
//!     reduce::MetricSet,
//!     sweep::{Condition, SweepParameter},
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let sweep = SweepParameter::from_tokens_and_values(
//!     &["0", "5", "10", "15", "20"],
//!     &[0.0, 0.05, 0.1, 0.15, 0.2],
//! )?;
//! let conditions = [
//!     Condition::new("oluct", "oluct").with_label("OLUCT"),
//!     Condition::new("olta0", "olta0").with_label("Plain OLTA"),
//! ];
//!
//! let report = Aggregator::new("data/backup/olta/continuous", sweep, MetricSet::default())
//!     .aggregate(&conditions)?;
//! let relative = report.compare_to_baseline("oluct", "score", DifferenceMode::Relative)?;
//!
//! for series in &relative {
//!     println!("{}: {:?}", series.condition, series.values);
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod compare;
pub mod error;
pub mod reduce;
pub mod summary;
pub mod sweep;
pub mod table;
pub mod world;

pub use self::error::AnalysisError;
