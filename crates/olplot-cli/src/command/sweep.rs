use std::path::{Path, PathBuf};

use anyhow::Context as _;
use olplot_analysis::aggregate::SweepReport;

use crate::{
    render::{ChartStyle, sweep_chart},
    schema::experiment::ExperimentConfig,
    util::{self, Output},
};

use super::table;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SweepArg {
    /// Experiment description (JSON)
    pub(super) config: PathBuf,
    /// Log-transform every metric even if the experiment file does not ask for it
    #[arg(long)]
    pub(super) log: bool,
    /// Render the sweep chart to this SVG file
    #[arg(long)]
    pub(super) svg: Option<PathBuf>,
    /// Save the aggregated report as JSON ("-" for stdout)
    #[arg(long)]
    pub(super) json: Option<PathBuf>,
}

/// Load the experiment file and aggregate every condition over the sweep
pub(super) fn load_report(
    config_path: &Path,
    force_log: bool,
) -> anyhow::Result<(ExperimentConfig, SweepReport)> {
    let config = util::read_experiment_file(config_path)?;
    let aggregator = config
        .aggregator(force_log)
        .with_context(|| format!("Invalid experiment file: {}", config_path.display()))?;
    let report = aggregator
        .aggregate(&config.conditions)
        .with_context(|| format!("Failed to aggregate {}", config_path.display()))?;
    Ok((config, report))
}

pub(crate) fn run(arg: &SweepArg) -> anyhow::Result<()> {
    let (config, report) = load_report(&arg.config, arg.log)?;

    if !util::json_to_stdout(arg.json.as_deref()) {
        for condition in &report.conditions {
            table::print_condition_table(condition, &report.sweep);
        }
    }

    if let Some(svg) = &arg.svg {
        let style = ChartStyle::default().with_x_label(config.x_label());
        sweep_chart::render(svg, &report, &style)?;
    }
    if let Some(json) = &arg.json {
        Output::save_json(&report, util::json_output_path(json))?;
    }
    Ok(())
}

#[cfg(test)]
pub(super) mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    /// Writes `uct` and `oluct` results for tokens 0 / 5 / 10 and an experiment file
    /// whose relative `root` points next to it.
    pub(in crate::command) fn write_experiment(dir: &Path) -> PathBuf {
        let data = dir.join("data");
        fs::create_dir_all(&data).unwrap();
        for (prefix, offset) in [("uct", 0.0), ("oluct", 1.0)] {
            for (token, step) in [("0", 0.0), ("5", 1.0), ("10", 2.0)] {
                let base = 10.0 + offset - step;
                fs::write(
                    data.join(format!("{prefix}{token}.csv")),
                    format!(
                        "score,computational_cost,nb_calls\n{},100,10\n{},200,20\n",
                        base - 1.0,
                        base + 1.0
                    ),
                )
                .unwrap();
            }
        }

        let config = dir.join("experiment.json");
        fs::write(
            &config,
            r#"{
                "root": "data",
                "sweep": { "values": [0.0, 0.05, 0.1], "encoding": "percent" },
                "conditions": [
                    { "name": "uct", "prefix": "uct", "label": "Vanilla UCT" },
                    { "name": "oluct", "prefix": "oluct", "label": "OLUCT" }
                ],
                "baseline": { "condition": "uct" }
            }"#,
        )
        .unwrap();
        config
    }

    #[test]
    fn test_load_report() {
        let dir = TempDir::new().unwrap();
        let config = write_experiment(dir.path());

        let (_, report) = load_report(&config, false).unwrap();
        assert_eq!(report.conditions.len(), 2);
        let score = report.conditions[1].series("score").unwrap();
        assert_eq!(score.x, [0.0, 0.05, 0.1]);
        assert_eq!(score.means, [11.0, 10.0, 9.0]);
    }

    #[test]
    fn test_run_writes_outputs() {
        let dir = TempDir::new().unwrap();
        let config = write_experiment(dir.path());
        let svg = dir.path().join("plots/sweep.svg");
        let json = dir.path().join("plots/sweep.json");

        run(&SweepArg {
            config,
            log: true,
            svg: Some(svg.clone()),
            json: Some(json.clone()),
        })
        .unwrap();

        assert!(fs::read_to_string(&svg).unwrap().contains("<svg"));
        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
        assert_eq!(report["options"]["log_transform"], true);
        assert_eq!(report["conditions"].as_array().unwrap().len(), 2);
    }
}
