use std::path::PathBuf;

use anyhow::{Context as _, bail};
use olplot_analysis::{compare::DifferenceMode, reduce::MetricSet};

use crate::{
    render::{ChartStyle, compare_chart},
    util::{self, Output},
};

use super::{sweep, table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum ModeArg {
    /// (value - baseline) / baseline
    Relative,
    /// value - baseline
    Absolute,
}

impl From<ModeArg> for DifferenceMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Relative => DifferenceMode::Relative,
            ModeArg::Absolute => DifferenceMode::Absolute,
        }
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct CompareArg {
    /// Experiment description (JSON)
    pub(super) config: PathBuf,
    /// Baseline condition name, overriding the experiment file
    #[arg(long)]
    pub(super) baseline: Option<String>,
    /// Metric to compare, overriding the experiment file
    #[arg(long)]
    pub(super) metric: Option<String>,
    /// Difference mode, overriding the experiment file
    #[arg(long, value_enum)]
    pub(super) mode: Option<ModeArg>,
    /// Log-transform every metric even if the experiment file does not ask for it
    #[arg(long)]
    pub(super) log: bool,
    /// Render the comparison chart to this SVG file
    #[arg(long)]
    pub(super) svg: Option<PathBuf>,
    /// Save the comparison series as JSON ("-" for stdout)
    #[arg(long)]
    pub(super) json: Option<PathBuf>,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let (config, report) = sweep::load_report(&arg.config, arg.log)?;

    let file_baseline = config.baseline.as_ref();
    let Some(baseline) = arg
        .baseline
        .clone()
        .or_else(|| file_baseline.map(|b| b.condition.clone()))
    else {
        bail!(
            "No baseline condition: pass --baseline or add `baseline` to {}",
            arg.config.display()
        );
    };
    let metric = arg
        .metric
        .clone()
        .or_else(|| file_baseline.map(|b| b.metric.clone()))
        .unwrap_or_else(|| MetricSet::SCORE.to_owned());
    let mode = arg
        .mode
        .map(DifferenceMode::from)
        .or_else(|| file_baseline.map(|b| b.mode))
        .unwrap_or_default();

    tracing::info!(%baseline, %metric, ?mode, "comparing conditions");
    let comparisons = report
        .compare_to_baseline(&baseline, &metric, mode)
        .with_context(|| format!("Failed to compare against baseline `{baseline}`"))?;

    if !util::json_to_stdout(arg.json.as_deref()) {
        table::print_comparison_table(&comparisons);
    }

    if let Some(svg) = &arg.svg {
        let style = ChartStyle::default().with_x_label(config.x_label());
        compare_chart::render(svg, &report, &comparisons, &style)?;
    }
    if let Some(json) = &arg.json {
        Output::save_json(&comparisons, util::json_output_path(json))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::{sweep::tests::write_experiment, *};

    #[test]
    fn test_run_uses_file_baseline() {
        let dir = TempDir::new().unwrap();
        let config = write_experiment(dir.path());
        let svg = dir.path().join("compare.svg");
        let json = dir.path().join("compare.json");

        run(&CompareArg {
            config,
            svg: Some(svg.clone()),
            json: Some(json.clone()),
            ..CompareArg::default()
        })
        .unwrap();

        assert!(fs::read_to_string(&svg).unwrap().contains("<svg"));
        let comparisons: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
        let comparisons = comparisons.as_array().unwrap();
        assert_eq!(comparisons.len(), 2);
        assert_eq!(comparisons[0]["condition"], "uct");
        assert_eq!(comparisons[0]["mode"], "relative");
        assert_eq!(comparisons[0]["values"][1], 0.0);
        assert_eq!(comparisons[1]["values"][0], 0.1);
    }

    #[test]
    fn test_run_absolute_override() {
        let dir = TempDir::new().unwrap();
        let config = write_experiment(dir.path());
        let json = dir.path().join("compare.json");

        run(&CompareArg {
            config,
            baseline: Some("oluct".to_owned()),
            mode: Some(ModeArg::Absolute),
            json: Some(json.clone()),
            ..CompareArg::default()
        })
        .unwrap();

        let comparisons: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
        assert_eq!(comparisons[0]["condition"], "uct");
        assert_eq!(comparisons[0]["values"][2], -1.0);
    }

    #[test]
    fn test_run_unknown_baseline() {
        let dir = TempDir::new().unwrap();
        let config = write_experiment(dir.path());

        let result = run(&CompareArg {
            config,
            baseline: Some("olta".to_owned()),
            ..CompareArg::default()
        });
        assert!(result.is_err());
    }
}
