use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use olplot_analysis::{
    aggregate::Aggregator,
    compare::DifferenceMode,
    reduce::{MetricSet, ReduceOptions},
    sweep::{Condition, SweepParameter, TokenEncoding},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExperimentConfig {
    /// Directory the condition prefixes are resolved under; a relative path
    /// is taken relative to the directory of the experiment file
    #[serde(default)]
    pub root: PathBuf,
    pub sweep: SweepConfig,
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub metrics: MetricSet,
    #[serde(default)]
    pub log_transform: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<BaselineConfig>,
}

/// Sweep section; exactly one of `tokens` and `encoding` must be given.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SweepConfig {
    /// x-axis label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// File-name tokens, listed verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<String>>,
    pub values: Vec<f64>,
    /// Rule deriving tokens from `values`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<TokenEncoding>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BaselineConfig {
    pub condition: String,
    #[serde(default = "BaselineConfig::default_metric")]
    pub metric: String,
    #[serde(default)]
    pub mode: DifferenceMode,
}

impl BaselineConfig {
    fn default_metric() -> String {
        MetricSet::SCORE.to_owned()
    }
}

impl ExperimentConfig {
    /// Makes a relative `root` relative to `config_dir` instead of the working directory.
    pub fn resolve_root(&mut self, config_dir: &Path) {
        if self.root.is_relative() {
            self.root = config_dir.join(&self.root);
        }
    }

    pub fn sweep_parameter(&self) -> anyhow::Result<SweepParameter> {
        let sweep = match (&self.sweep.tokens, self.sweep.encoding) {
            (Some(tokens), None) => {
                SweepParameter::from_tokens_and_values(tokens.as_slice(), &self.sweep.values)
            }
            (None, Some(encoding)) => SweepParameter::from_values(&self.sweep.values, encoding),
            (Some(_), Some(_)) => {
                bail!("Sweep gives both `tokens` and `encoding`; keep only one of them")
            }
            (None, None) => bail!("Sweep needs either `tokens` or `encoding`"),
        };
        sweep.context("Invalid sweep in experiment file")
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.conditions.is_empty() {
            bail!("Experiment file lists no conditions");
        }
        for (i, condition) in self.conditions.iter().enumerate() {
            if self.conditions[..i]
                .iter()
                .any(|c| c.name == condition.name)
            {
                bail!("Condition `{}` is listed more than once", condition.name);
            }
        }
        if self.metrics.is_empty() {
            bail!("Experiment file lists no metrics");
        }
        Ok(())
    }

    /// Builds the aggregator; `force_log` turns the log-transform on regardless of the file.
    pub fn aggregator(&self, force_log: bool) -> anyhow::Result<Aggregator> {
        self.validate()?;
        let options = ReduceOptions {
            log_transform: self.log_transform || force_log,
        };
        Ok(
            Aggregator::new(&self.root, self.sweep_parameter()?, self.metrics.clone())
                .with_options(options),
        )
    }

    pub fn x_label(&self) -> &str {
        self.sweep
            .label
            .as_deref()
            .unwrap_or("Transition misstep probability")
    }
}
