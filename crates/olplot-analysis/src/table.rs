//! Column-oriented result tables
//!
//! A result file is a comma-separated table written by the experiment
//! runner: a header row, then one row per independent trial.
//!
//! ```text
//! score,achieved_return,computational_cost,nb_calls
//! 41,12.5,230.1,5120
//! 38,13.0,221.7,4987
//! ```
//!
//! Only the requested columns are parsed; any other column may hold
//! arbitrary text. Every requested cell must be a finite number.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use crate::error::{AnalysisError, InvalidReason, SchemaIssue};

/// Parsed content of one result file, restricted to the requested columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    path: PathBuf,
    rows: usize,
    columns: Vec<(String, Vec<f64>)>,
}

impl ResultTable {
    /// Loads `columns` from the CSV file at `path`.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::FileNotFound`] if `path` does not exist
    /// - [`AnalysisError::SchemaError`] if a column is missing, the file has no
    ///   data rows, or the CSV is structurally malformed
    /// - [`AnalysisError::InvalidValue`] if a requested cell is not a finite number
    pub fn load<P, S>(path: P, columns: &[S]) -> Result<Self, AnalysisError>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| open_error(path, e))?;
        let table = Self::from_reader(path, file, columns)?;
        tracing::debug!(
            path = %path.display(),
            rows = table.rows,
            "loaded result table"
        );
        Ok(table)
    }

    /// Parses `columns` from CSV data; `path` is used for error reporting only.
    pub fn from_reader<R, S>(path: &Path, reader: R, columns: &[S]) -> Result<Self, AnalysisError>
    where
        R: io::Read,
        S: AsRef<str>,
    {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| csv_error(path, e))?
            .clone();
        let indices = columns
            .iter()
            .map(|column| {
                let column = column.as_ref();
                headers
                    .iter()
                    .position(|h| h == column)
                    .ok_or_else(|| AnalysisError::SchemaError {
                        path: path.to_owned(),
                        issue: SchemaIssue::MissingColumn(column.to_owned()),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut data = vec![Vec::new(); columns.len()];
        let mut rows = 0;
        for record in reader.records() {
            let record = record.map_err(|e| csv_error(path, e))?;
            rows += 1;
            for ((column, &index), samples) in columns.iter().zip(&indices).zip(&mut data) {
                let cell = record.get(index).unwrap_or_default();
                let value = parse_cell(cell).ok_or_else(|| AnalysisError::InvalidValue {
                    origin: path.display().to_string(),
                    column: column.as_ref().to_owned(),
                    row: rows,
                    value: cell.to_owned(),
                    reason: InvalidReason::NotANumber,
                })?;
                samples.push(value);
            }
        }

        if rows == 0 {
            return Err(AnalysisError::SchemaError {
                path: path.to_owned(),
                issue: SchemaIssue::NoRows,
            });
        }

        let columns = columns
            .iter()
            .map(|c| c.as_ref().to_owned())
            .zip(data)
            .collect();
        Ok(Self {
            path: path.to_owned(),
            rows,
            columns,
        })
    }

    /// Builds a table from in-memory columns.
    ///
    /// # Panics
    ///
    /// Panics if the columns do not all have the same length.
    #[must_use]
    pub fn from_columns<P>(path: P, columns: Vec<(String, Vec<f64>)>) -> Self
    where
        P: Into<PathBuf>,
    {
        let rows = columns.first().map_or(0, |(_, values)| values.len());
        assert!(
            columns.iter().all(|(_, values)| values.len() == rows),
            "all columns must have the same length"
        );
        Self {
            path: path.into(),
            rows,
            columns,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of trials (data rows).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Like [`column`](Self::column), but a missing column is a schema error.
    pub fn require_column(&self, name: &str) -> Result<&[f64], AnalysisError> {
        self.column(name).ok_or_else(|| AnalysisError::SchemaError {
            path: self.path.clone(),
            issue: SchemaIssue::MissingColumn(name.to_owned()),
        })
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|(n, _)| n.as_str())
    }
}

fn parse_cell(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn open_error(path: &Path, error: io::Error) -> AnalysisError {
    if error.kind() == io::ErrorKind::NotFound {
        AnalysisError::FileNotFound {
            path: path.to_owned(),
        }
    } else {
        AnalysisError::Io {
            path: path.to_owned(),
            source: error,
        }
    }
}

fn csv_error(path: &Path, error: csv::Error) -> AnalysisError {
    let message = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(source) => AnalysisError::Io {
            path: path.to_owned(),
            source,
        },
        _ => AnalysisError::SchemaError {
            path: path.to_owned(),
            issue: SchemaIssue::Malformed(message),
        },
    }
}
