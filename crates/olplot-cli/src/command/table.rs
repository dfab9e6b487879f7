//! Plain-text tables printed to stdout
//!
//! Every command prints its numbers before any chart is written, so a run
//! can be checked from the terminal alone.

use olplot_analysis::{
    aggregate::ConditionSeries,
    compare::{ComparisonSeries, DifferenceMode},
    summary::FileSummary,
    sweep::SweepParameter,
};

const LABEL_WIDTH: usize = 12;
const CELL_WIDTH: usize = 24;

/// Format a mean / std pair as a fixed-width cell
fn mean_std_cell(mean: f64, std_dev: f64) -> String {
    format!("{mean:.4} ± {std_dev:.4}")
}

fn difference_cell(value: f64, mode: DifferenceMode) -> String {
    match mode {
        DifferenceMode::Relative => format!("{:+.2}%", value * 100.0),
        DifferenceMode::Absolute => format!("{value:+.4}"),
    }
}

fn print_separator(columns: usize) {
    println!("  {}", "-".repeat(LABEL_WIDTH + (CELL_WIDTH + 1) * columns));
}

/// Print one table per file: count, mean, std, min, median and max per metric
pub(super) fn print_file_summary(summary: &FileSummary) {
    println!(
        "{} ({} rows{})",
        summary.path.display(),
        summary.rows,
        if summary.log_transform { ", log" } else { "" }
    );
    println!(
        "  {:<20} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Metric", "Count", "Mean", "Std", "Min", "Median", "Max",
    );
    println!("  {}", "-".repeat(20 + 8 + 12 * 5 + 6));
    for column in &summary.columns {
        let stats = &column.stats;
        println!(
            "  {:<20} {:>8} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
            column.metric, stats.count, stats.mean, stats.std_dev, stats.min, stats.median, stats.max,
        );
    }
    println!();
}

/// Print one row per sweep point with a `mean ± std` cell per metric
pub(super) fn print_condition_table(condition: &ConditionSeries, sweep: &SweepParameter) {
    println!(
        "{} ({})",
        condition.condition.display_label(),
        condition.condition.name
    );

    print!("  {:<LABEL_WIDTH$}", "Sweep");
    for series in &condition.series {
        print!(" {:>CELL_WIDTH$}", series.metric);
    }
    println!();
    print_separator(condition.series.len());

    for (i, point) in sweep.points().iter().enumerate() {
        print!("  {:<LABEL_WIDTH$}", format!("{} ({})", point.value, point.token));
        for series in &condition.series {
            print!(
                " {:>CELL_WIDTH$}",
                mean_std_cell(series.means[i], series.std_devs[i])
            );
        }
        println!();
    }
    println!();
}

/// Print the comparison values with one column per condition
pub(super) fn print_comparison_table(comparisons: &[ComparisonSeries]) {
    let Some(first) = comparisons.first() else {
        return;
    };
    println!(
        "{} difference of `{}` against `{}`",
        match first.mode {
            DifferenceMode::Relative => "Relative",
            DifferenceMode::Absolute => "Absolute",
        },
        first.metric,
        first.baseline
    );

    print!("  {:<LABEL_WIDTH$}", "Sweep");
    for comparison in comparisons {
        print!(" {:>CELL_WIDTH$}", comparison.condition);
    }
    println!();
    print_separator(comparisons.len());

    for (i, x) in first.x.iter().enumerate() {
        print!("  {x:<LABEL_WIDTH$}");
        for comparison in comparisons {
            print!(
                " {:>CELL_WIDTH$}",
                difference_cell(comparison.values[i], comparison.mode)
            );
        }
        println!();
    }
    println!();
}
