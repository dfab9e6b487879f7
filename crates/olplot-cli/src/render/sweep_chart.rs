//! One panel per metric, stacked vertically over a shared sweep axis

use std::path::Path;

use anyhow::Context as _;
use olplot_analysis::aggregate::SweepReport;
use plotters::{coord::Shift, prelude::*};

use crate::util;

use super::{ChartStyle, metric_label, padded_range, value_bounds};

pub fn render(path: &Path, report: &SweepReport, style: &ChartStyle) -> anyhow::Result<()> {
    util::ensure_parent_dir(path)?;
    let panels = report.metrics.len().max(1);
    let (width, height) = style.panel_size;
    let root = SVGBackend::new(path, (width, height * u32::try_from(panels)?)).into_drawing_area();
    root.fill(&WHITE)?;

    for (area, metric) in root.split_evenly((panels, 1)).iter().zip(report.metrics.iter()) {
        draw_stat_panel(area, report, metric, style)?;
    }

    root.present()
        .with_context(|| format!("Failed to write chart: {}", path.display()))?;
    tracing::info!(output = %path.display(), panels, "rendered sweep chart");
    Ok(())
}

/// Mean line, ±std error bars and a translucent ±std band for every condition.
pub(super) fn draw_stat_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    report: &SweepReport,
    metric: &str,
    style: &ChartStyle,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let mut series = Vec::with_capacity(report.conditions.len());
    for condition in &report.conditions {
        series.push((condition, condition.require_series(metric)?));
    }

    let (x_lo, x_hi) = value_bounds(report.sweep.values()).unwrap_or((0.0, 1.0));
    let (y_lo, y_hi) = series
        .iter()
        .filter_map(|(_, s)| s.band_range())
        .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
        .unwrap_or((0.0, 1.0));

    let label = metric_label(metric, report.options.log_transform);
    let mut chart = ChartBuilder::on(area)
        .caption(&label, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(padded_range(x_lo, x_hi), padded_range(y_lo, y_hi))?;

    chart
        .configure_mesh()
        .x_desc(style.x_label.as_str())
        .y_desc(label.as_str())
        .draw()?;

    for (i, (condition, series)) in series.iter().enumerate() {
        let color = style.color(i);
        let line_style = color.stroke_width(style.stroke_width);

        let band = series
            .points()
            .map(|(x, mean, std_dev)| (x, mean + std_dev))
            .chain(
                series
                    .points()
                    .rev()
                    .map(|(x, mean, std_dev)| (x, mean - std_dev)),
            )
            .collect::<Vec<_>>();
        chart.draw_series(std::iter::once(Polygon::new(
            band,
            color.mix(style.band_opacity).filled(),
        )))?;

        chart.draw_series(series.points().map(|(x, mean, std_dev)| {
            ErrorBar::new_vertical(x, mean - std_dev, mean, mean + std_dev, line_style, 8)
        }))?;

        chart
            .draw_series(LineSeries::new(
                series.points().map(|(x, mean, _)| (x, mean)),
                line_style,
            ))?
            .label(condition.condition.display_label())
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
