use std::path::PathBuf;

use anyhow::Context as _;
use olplot_analysis::{
    reduce::{MetricSet, ReduceOptions},
    summary::{self, FileSummary},
};

use crate::util::{self, Output};

use super::table;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SummarizeArg {
    /// Result CSV files to summarize
    #[arg(required = true)]
    pub(super) files: Vec<PathBuf>,
    /// Comma-separated metric columns [default: `achieved_return`]
    #[arg(long, value_delimiter = ',')]
    pub(super) metrics: Vec<String>,
    /// Take the natural log of every sample before summarizing
    #[arg(long)]
    pub(super) log: bool,
    /// Save the summaries as JSON ("-" for stdout)
    #[arg(long)]
    pub(super) output: Option<PathBuf>,
}

impl SummarizeArg {
    fn metric_set(&self) -> MetricSet {
        if self.metrics.is_empty() {
            MetricSet::achieved_return()
        } else {
            MetricSet::new(&self.metrics)
        }
    }
}

pub(crate) fn run(arg: &SummarizeArg) -> anyhow::Result<()> {
    let metrics = arg.metric_set();
    let options = ReduceOptions {
        log_transform: arg.log,
    };

    let summaries = arg
        .files
        .iter()
        .map(|path| {
            summary::summarize_file(path, &metrics, options)
                .with_context(|| format!("Failed to summarize {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<FileSummary>>>()?;

    if !util::json_to_stdout(arg.output.as_deref()) {
        for summary in &summaries {
            table::print_file_summary(summary);
        }
    }

    if let Some(output) = &arg.output {
        Output::save_json(&summaries, util::json_output_path(output))?;
    }
    Ok(())
}
