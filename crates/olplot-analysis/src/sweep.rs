//! Sweep parameters and experimental conditions
//!
//! A sweep is the ordered list of values of the independent variable an
//! experiment was run over (for example the transition misstep probability).
//! Each sweep point carries both its real value, used as the x-axis
//! coordinate, and its file-name token, used to locate result files.
//!
//! The token encoding is always explicit: either the tokens are listed
//! verbatim, or a [`TokenEncoding`] is chosen. It is never guessed from the
//! files on disk.
//!
//! # File naming
//!
//! ```text
//! <root>/<condition prefix><sweep token>.csv
//!
//! root = data/backup/continuous, prefix = oluct0, token = 5
//!   -> data/backup/continuous/oluct05.csv
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Error building a [`SweepParameter`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SweepError {
    #[display("sweep has no values")]
    Empty,
    #[display("sweep has {tokens} tokens but {values} values")]
    LengthMismatch { tokens: usize, values: usize },
    #[display("sweep token `{token}` appears more than once")]
    DuplicateToken { token: String },
}

/// How sweep values are turned into file-name tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenEncoding {
    /// Percentage without padding: `0.05` -> `"5"`, `0.5` -> `"50"`
    Percent,
    /// Percentage left-padded with zeros: `0.05` -> `"005"` with width 3
    ZeroPaddedPercent(usize),
}

impl TokenEncoding {
    /// Encodes a sweep value into its file-name token.
    ///
    /// # Examples
    ///
    /// ```
    /// use olplot_analysis::sweep::TokenEncoding;
    ///
    /// assert_eq!(TokenEncoding::Percent.encode(0.05), "5");
    /// assert_eq!(TokenEncoding::ZeroPaddedPercent(3).encode(0.05), "005");
    /// assert_eq!(TokenEncoding::ZeroPaddedPercent(3).encode(0.5), "050");
    /// ```
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn encode(self, value: f64) -> String {
        // rounding keeps 0.29 from becoming "28"
        let percent = (value * 100.0).round() as i64;
        match self {
            TokenEncoding::Percent => percent.to_string(),
            TokenEncoding::ZeroPaddedPercent(width) => format!("{percent:0width$}"),
        }
    }
}

/// One point of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// File-name encoding of the value
    pub token: String,
    /// Real value used as x-axis coordinate
    pub value: f64,
}

/// Ordered, non-empty sequence of sweep points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepParameter {
    points: Vec<SweepPoint>,
}

impl SweepParameter {
    pub fn new(points: Vec<SweepPoint>) -> Result<Self, SweepError> {
        if points.is_empty() {
            return Err(SweepError::Empty);
        }
        for (i, point) in points.iter().enumerate() {
            if points[..i].iter().any(|p| p.token == point.token) {
                return Err(SweepError::DuplicateToken {
                    token: point.token.clone(),
                });
            }
        }
        Ok(Self { points })
    }

    /// Builds a sweep from parallel token and value lists.
    pub fn from_tokens_and_values<S>(tokens: &[S], values: &[f64]) -> Result<Self, SweepError>
    where
        S: AsRef<str>,
    {
        if tokens.len() != values.len() {
            return Err(SweepError::LengthMismatch {
                tokens: tokens.len(),
                values: values.len(),
            });
        }
        let points = tokens
            .iter()
            .zip(values)
            .map(|(token, &value)| SweepPoint {
                token: token.as_ref().to_owned(),
                value,
            })
            .collect();
        Self::new(points)
    }

    /// Builds a sweep from values, deriving tokens with `encoding`.
    pub fn from_values(values: &[f64], encoding: TokenEncoding) -> Result<Self, SweepError> {
        let points = values
            .iter()
            .map(|&value| SweepPoint {
                token: encoding.encode(value),
                value,
            })
            .collect();
        Self::new(points)
    }

    #[must_use]
    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false` for a constructed sweep.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The x-axis values in declared order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// A named experimental variant whose result files share a path prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Identifier used in reports and for baseline lookup
    pub name: String,
    /// Path prefix the sweep token and `.csv` are appended to
    pub prefix: String,
    /// Legend text; falls back to `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Condition {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Path of the result file for one sweep point, resolved under `root`.
    ///
    /// The token is appended to the prefix as a plain string, so a prefix of
    /// `"uct"` and token `"5"` yields `uct5.csv`.
    #[must_use]
    pub fn result_path(&self, root: &Path, point: &SweepPoint) -> PathBuf {
        root.join(format!("{}{}.csv", self.prefix, point.token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_tokens() {
        let sweep =
            SweepParameter::from_values(&[0.0, 0.05, 0.1, 0.29, 0.5], TokenEncoding::Percent)
                .unwrap();
        let tokens = sweep
            .points()
            .iter()
            .map(|p| p.token.as_str())
            .collect::<Vec<_>>();
        assert_eq!(tokens, ["0", "5", "10", "29", "50"]);
        assert_eq!(sweep.values(), [0.0, 0.05, 0.1, 0.29, 0.5]);
    }

    #[test]
    fn test_zero_padded_tokens() {
        let sweep =
            SweepParameter::from_values(&[0.0, 0.05, 0.45], TokenEncoding::ZeroPaddedPercent(3))
                .unwrap();
        let tokens = sweep
            .points()
            .iter()
            .map(|p| p.token.as_str())
            .collect::<Vec<_>>();
        assert_eq!(tokens, ["000", "005", "045"]);
    }

    #[test]
    fn test_explicit_tokens_keep_order() {
        let sweep =
            SweepParameter::from_tokens_and_values(&["10", "0", "5"], &[0.1, 0.0, 0.05]).unwrap();
        assert_eq!(sweep.values(), [0.1, 0.0, 0.05]);
        assert_eq!(sweep.points()[0].token, "10");
    }

    #[test]
    fn test_invalid_sweeps() {
        assert_eq!(
            SweepParameter::from_tokens_and_values(&["0", "5"], &[0.0]).unwrap_err(),
            SweepError::LengthMismatch {
                tokens: 2,
                values: 1
            }
        );
        assert_eq!(
            SweepParameter::from_tokens_and_values::<&str>(&[], &[]).unwrap_err(),
            SweepError::Empty
        );
        assert_eq!(
            SweepParameter::from_tokens_and_values(&["5", "5"], &[0.05, 0.05]).unwrap_err(),
            SweepError::DuplicateToken {
                token: "5".to_owned()
            }
        );
    }

    #[test]
    fn test_result_path() {
        let condition = Condition::new("uct", "uct");
        let point = SweepPoint {
            token: "5".to_owned(),
            value: 0.05,
        };
        assert_eq!(
            condition.result_path(Path::new("data/backup"), &point),
            Path::new("data/backup/uct5.csv")
        );
        assert_eq!(condition.display_label(), "uct");
        assert_eq!(
            condition.with_label("Vanilla UCT").display_label(),
            "Vanilla UCT"
        );
    }
}
