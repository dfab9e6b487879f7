//! World geometry and agent trajectories
//!
//! Describes the 2D world a planning run navigated: its bounds, rectangular
//! and circular obstacles, the start position and the reward model, plus
//! the trajectory the agent actually followed.
//!
//! # World file
//!
//! ```json
//! {
//!   "xsize": 1.0,
//!   "ysize": 1.0,
//!   "start": { "x": 0.1, "y": 0.1 },
//!   "rectangles": [{ "x": 0.5, "y": 0.5, "w": 0.2, "h": 0.1 }],
//!   "circles": [{ "x": 0.3, "y": 0.7, "r": 0.05 }],
//!   "reward_model": {
//!     "kind": "waypoints",
//!     "waypoints": [{ "x": 0.9, "y": 0.9, "r": 0.03 }]
//!   }
//! }
//! ```
//!
//! A heatmap reward model lists moving Gaussian reward fields instead; each
//! field's centre path is a CSV file with `x` and `y` columns, resolved
//! relative to the world file:
//!
//! ```json
//! "reward_model": {
//!   "kind": "heatmap",
//!   "fields": [{ "path": "rfield0.csv", "sigma": 0.05, "magnitude": 1.0 }]
//! }
//! ```
//!
//! Rectangles are given by their centre; use [`Rectangle::lower_left`] to get
//! the drawing origin.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::AnalysisError, table::ResultTable};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned rectangle described by its centre and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rectangle {
    #[must_use]
    pub fn lower_left(&self) -> Point {
        Point {
            x: self.x - self.w / 2.0,
            y: self.y - self.h / 2.0,
        }
    }

    #[must_use]
    pub fn upper_right(&self) -> Point {
        Point {
            x: self.x + self.w / 2.0,
            y: self.y + self.h / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardField {
    /// CSV file of the field centre's path
    pub path: PathBuf,
    pub sigma: f64,
    pub magnitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RewardModel {
    Waypoints { waypoints: Vec<Circle> },
    Heatmap { fields: Vec<RewardField> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub xsize: f64,
    pub ysize: f64,
    pub start: Point,
    #[serde(default)]
    pub rectangles: Vec<Rectangle>,
    #[serde(default)]
    pub circles: Vec<Circle>,
    pub reward_model: RewardModel,
}

impl WorldConfig {
    /// Checks that every size is positive and finite.
    pub fn validate(&self, path: &Path) -> Result<(), AnalysisError> {
        let invalid = |reason: String| AnalysisError::InvalidWorld {
            path: path.to_owned(),
            reason,
        };
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.xsize) || !positive(self.ysize) {
            return Err(invalid(format!(
                "world size {}x{} must be positive",
                self.xsize, self.ysize
            )));
        }
        for (i, rect) in self.rectangles.iter().enumerate() {
            if !positive(rect.w) || !positive(rect.h) {
                return Err(invalid(format!("rectangle {i} has a non-positive size")));
            }
        }
        for (i, circle) in self.circles.iter().enumerate() {
            if !positive(circle.r) {
                return Err(invalid(format!("circle {i} has a non-positive radius")));
            }
        }
        match &self.reward_model {
            RewardModel::Waypoints { waypoints } => {
                for (i, wp) in waypoints.iter().enumerate() {
                    if !positive(wp.r) {
                        return Err(invalid(format!("waypoint {i} has a non-positive radius")));
                    }
                }
            }
            RewardModel::Heatmap { fields } => {
                for (i, field) in fields.iter().enumerate() {
                    if !positive(field.sigma) {
                        return Err(invalid(format!(
                            "reward field {i} has a non-positive sigma"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Ordered (x, y) positions read from a CSV file with `x` and `y` columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    points: Vec<(f64, f64)>,
}

impl Trajectory {
    pub fn load<P>(path: P) -> Result<Self, AnalysisError>
    where
        P: AsRef<Path>,
    {
        let table = ResultTable::load(path, &["x", "y"])?;
        Ok(Self::from_table(&table))
    }

    fn from_table(table: &ResultTable) -> Self {
        let xs = table.column("x").unwrap_or_default();
        let ys = table.column("y").unwrap_or_default();
        Self {
            points: xs.iter().copied().zip(ys.iter().copied()).collect(),
        }
    }

    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}

/// A reward field together with its loaded centre path.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardFieldTrack {
    pub field: RewardField,
    pub track: Trajectory,
}

/// A validated world with every referenced file loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub config: WorldConfig,
    pub reward_fields: Vec<RewardFieldTrack>,
}

impl World {
    /// Reads, validates and resolves a world file.
    pub fn load<P>(path: P) -> Result<Self, AnalysisError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                AnalysisError::FileNotFound {
                    path: path.to_owned(),
                }
            } else {
                AnalysisError::Io {
                    path: path.to_owned(),
                    source: e,
                }
            }
        })?;
        let config: WorldConfig =
            serde_json::from_str(&content).map_err(|e| AnalysisError::InvalidWorld {
                path: path.to_owned(),
                reason: e.to_string(),
            })?;
        config.validate(path)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let reward_fields = match &config.reward_model {
            RewardModel::Waypoints { .. } => vec![],
            RewardModel::Heatmap { fields } => fields
                .iter()
                .map(|field| {
                    let track = Trajectory::load(base.join(&field.path))?;
                    Ok(RewardFieldTrack {
                        field: field.clone(),
                        track,
                    })
                })
                .collect::<Result<Vec<_>, AnalysisError>>()?,
        };

        tracing::debug!(
            path = %path.display(),
            rectangles = config.rectangles.len(),
            circles = config.circles.len(),
            reward_fields = reward_fields.len(),
            "loaded world"
        );
        Ok(Self {
            config,
            reward_fields,
        })
    }
}
