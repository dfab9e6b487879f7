use clap::{Parser, Subcommand};

use self::{
    compare::CompareArg, summarize::SummarizeArg, sweep::SweepArg, trajectory::TrajectoryArg,
};

mod compare;
mod summarize;
mod sweep;
mod table;
mod trajectory;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What to plot or summarize
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Summarize the metric columns of individual result files
    Summarize(#[clap(flatten)] SummarizeArg),
    /// Aggregate an experiment sweep into mean / std series
    Sweep(#[clap(flatten)] SweepArg),
    /// Compare every condition of a sweep against a baseline condition
    Compare(#[clap(flatten)] CompareArg),
    /// Draw a world and the trajectory an agent followed in it
    Trajectory(#[clap(flatten)] TrajectoryArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Summarize(arg) => summarize::run(&arg)?,
        Mode::Sweep(arg) => sweep::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
        Mode::Trajectory(arg) => trajectory::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_compare_defaults() {
        let args = CommandArgs::try_parse_from(["olplot", "compare", "exp.json"]).unwrap();
        let Mode::Compare(arg) = args.mode else {
            panic!("expected compare subcommand");
        };
        assert_eq!(arg.config.to_str(), Some("exp.json"));
        assert!(arg.baseline.is_none());
        assert!(arg.mode.is_none());
    }

    #[test]
    fn test_parse_summarize_metrics() {
        let args = CommandArgs::try_parse_from([
            "olplot",
            "summarize",
            "a.csv",
            "b.csv",
            "--metrics",
            "achieved_return,score",
            "--log",
        ])
        .unwrap();
        let Mode::Summarize(arg) = args.mode else {
            panic!("expected summarize subcommand");
        };
        assert_eq!(arg.files.len(), 2);
        assert_eq!(arg.metrics, ["achieved_return", "score"]);
        assert!(arg.log);
    }
}
