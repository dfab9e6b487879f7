use std::path::Path;

use anyhow::Context as _;
use olplot_analysis::world::{RewardFieldTrack, RewardModel, Trajectory, World};
use plotters::{
    coord::{Shift, types::RangedCoordf64},
    prelude::*,
};

use crate::util;

use super::{ChartStyle, circle_outline};

const START_RADIUS: f64 = 0.02;
const CIRCLE_SEGMENTS: usize = 64;

/// Opacity of the `index`-th of `count` reward-field circles; later positions are more opaque.
fn fade_alpha(index: usize, count: usize) -> f64 {
    #[expect(clippy::cast_precision_loss)]
    let (index, count) = (index as f64, count as f64);
    (index + 10.0) / ((count + 10.0) * 1.5)
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_pixels(v: f64) -> u32 {
    v.round().max(1.0) as u32
}

/// Chart size keeping the world's aspect ratio, with the panel width as the long side.
fn chart_size(world: &World, style: &ChartStyle) -> (u32, u32) {
    let side = f64::from(style.panel_size.0);
    let (xsize, ysize) = (world.config.xsize, world.config.ysize);
    let (w, h) = if xsize >= ysize {
        (side, side * ysize / xsize)
    } else {
        (side * xsize / ysize, side)
    };
    (to_pixels(w), to_pixels(h))
}

pub fn render(
    path: &Path,
    world: &World,
    trajectory: &Trajectory,
    style: &ChartStyle,
) -> anyhow::Result<()> {
    util::ensure_parent_dir(path)?;
    let root = SVGBackend::new(path, chart_size(world, style)).into_drawing_area();
    root.fill(&WHITE)?;
    draw_world(&root, world, trajectory, style)?;
    root.present()
        .with_context(|| format!("Failed to write chart: {}", path.display()))?;
    tracing::info!(
        output = %path.display(),
        steps = trajectory.points().len(),
        "rendered trajectory chart"
    );
    Ok(())
}

fn draw_world<DB>(
    area: &DrawingArea<DB, Shift>,
    world: &World,
    trajectory: &Trajectory,
    style: &ChartStyle,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let config = &world.config;
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..config.xsize, 0.0..config.ysize)?;
    chart.configure_mesh().disable_mesh().draw()?;

    let obstacle = style.obstacle_color.filled();
    chart.draw_series(config.rectangles.iter().map(|rect| {
        let (ll, ur) = (rect.lower_left(), rect.upper_right());
        Rectangle::new([(ll.x, ll.y), (ur.x, ur.y)], obstacle)
    }))?;
    chart.draw_series(config.circles.iter().map(|circle| {
        Polygon::new(
            circle_outline(circle.x, circle.y, circle.r, CIRCLE_SEGMENTS),
            obstacle,
        )
    }))?;

    chart.draw_series(std::iter::once(Polygon::new(
        circle_outline(config.start.x, config.start.y, START_RADIUS, CIRCLE_SEGMENTS),
        style.start_color.filled(),
    )))?;

    match &config.reward_model {
        RewardModel::Waypoints { waypoints } => {
            chart.draw_series(waypoints.iter().map(|wp| {
                Polygon::new(
                    circle_outline(wp.x, wp.y, wp.r, CIRCLE_SEGMENTS),
                    style.waypoint_color.filled(),
                )
            }))?;
        }
        RewardModel::Heatmap { .. } => {
            for field in &world.reward_fields {
                draw_reward_field(&mut chart, field, style)?;
            }
        }
    }

    chart.draw_series(LineSeries::new(
        trajectory.points().iter().copied(),
        style.trajectory_color.stroke_width(style.stroke_width),
    ))?;
    Ok(())
}

/// Centre path of a moving reward field plus a 3σ circle at every position.
fn draw_reward_field<DB>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    field: &RewardFieldTrack,
    style: &ChartStyle,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let color = style.reward_field_color;
    let points = field.track.points();
    chart.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(1)))?;

    let radius = 3.0 * field.field.sigma;
    chart.draw_series(points.iter().enumerate().map(|(j, &(x, y))| {
        PathElement::new(
            circle_outline(x, y, radius, CIRCLE_SEGMENTS),
            color.mix(fade_alpha(j, points.len())),
        )
    }))?;
    Ok(())
}
