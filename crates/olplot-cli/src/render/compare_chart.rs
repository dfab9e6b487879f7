//! Baseline comparison grid
//!
//! The first metric's error bars sit above the baseline difference of the
//! compared metric; the remaining metrics fill the following columns.

use std::path::Path;

use anyhow::Context as _;
use olplot_analysis::{
    aggregate::SweepReport,
    compare::{ComparisonSeries, DifferenceMode},
};
use plotters::{coord::Shift, prelude::*};

use crate::util;

use super::{ChartStyle, padded_range, sweep_chart, value_bounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel<'a> {
    Stat(&'a str),
    Difference,
}

/// Panels in drawing order; filled column by column in a two-row grid.
fn panel_layout(metrics: &[String]) -> Vec<Panel<'_>> {
    let mut panels = Vec::with_capacity(metrics.len() + 1);
    let mut metrics = metrics.iter();
    if let Some(first) = metrics.next() {
        panels.push(Panel::Stat(first));
    }
    panels.push(Panel::Difference);
    panels.extend(metrics.map(|m| Panel::Stat(m)));
    panels
}

/// Index into the row-major output of `split_evenly((2, columns))`.
fn grid_index(position: usize, columns: usize) -> usize {
    (position % 2) * columns + position / 2
}

pub fn render(
    path: &Path,
    report: &SweepReport,
    comparisons: &[ComparisonSeries],
    style: &ChartStyle,
) -> anyhow::Result<()> {
    util::ensure_parent_dir(path)?;
    let panels = panel_layout(report.metrics.as_slice());
    let columns = panels.len().div_ceil(2);
    let (width, height) = style.panel_size;
    let root = SVGBackend::new(path, (width * u32::try_from(columns)?, height * 2))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((2, columns));
    for (position, panel) in panels.iter().enumerate() {
        let area = &areas[grid_index(position, columns)];
        match panel {
            Panel::Stat(metric) => sweep_chart::draw_stat_panel(area, report, metric, style)?,
            Panel::Difference => draw_difference_panel(area, comparisons, style)?,
        }
    }

    root.present()
        .with_context(|| format!("Failed to write chart: {}", path.display()))?;
    tracing::info!(output = %path.display(), "rendered comparison chart");
    Ok(())
}

fn draw_difference_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    comparisons: &[ComparisonSeries],
    style: &ChartStyle,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let Some(first) = comparisons.first() else {
        return Ok(());
    };
    let relative = first.mode == DifferenceMode::Relative;
    let (x_lo, x_hi) = value_bounds(first.x.iter().copied()).unwrap_or((0.0, 1.0));
    let (y_lo, y_hi) = value_bounds(comparisons.iter().flat_map(|c| c.values.iter().copied()))
        .unwrap_or((0.0, 1.0));

    let caption = if relative {
        format!("{} relative to {}", first.metric, first.baseline)
    } else {
        format!("{} minus {}", first.metric, first.baseline)
    };
    let percent = |y: &f64| format!("{:.0}%", y * 100.0);
    let plain = |y: &f64| format!("{y:.2}");

    let mut chart = ChartBuilder::on(area)
        .caption(&caption, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(padded_range(x_lo, x_hi), padded_range(y_lo, y_hi))?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(style.x_label.as_str());
    if relative {
        mesh.y_label_formatter(&percent);
    } else {
        mesh.y_label_formatter(&plain);
    }
    mesh.draw()?;

    for (i, comparison) in comparisons.iter().enumerate() {
        let color = style.color(i);
        let line_style = color.stroke_width(style.stroke_width);
        let points = comparison
            .x
            .iter()
            .copied()
            .zip(comparison.values.iter().copied())
            .collect::<Vec<_>>();

        chart.draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 4, color.filled())),
        )?;
        chart
            .draw_series(LineSeries::new(points, line_style))?
            .label(comparison.condition.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;
    Ok(())
}
