//! SVG charts drawn with plotters
//!
//! Every chart takes a [`ChartStyle`]; nothing cosmetic is hard-coded in the
//! drawing functions. Conditions get palette colors in declaration order.

use std::ops::Range;

use plotters::style::RGBColor;

pub mod compare_chart;
pub mod sweep_chart;
pub mod trajectory_chart;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Condition colors, cycled when there are more conditions than colors
    pub palette: Vec<RGBColor>,
    pub stroke_width: u32,
    /// Opacity of the ±std band
    pub band_opacity: f64,
    /// Size of one chart panel in pixels
    pub panel_size: (u32, u32),
    pub x_label: String,
    pub obstacle_color: RGBColor,
    pub start_color: RGBColor,
    pub waypoint_color: RGBColor,
    pub reward_field_color: RGBColor,
    pub trajectory_color: RGBColor,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            palette: vec![
                RGBColor(0x00, 0x00, 0x00),
                RGBColor(0x00, 0xe6, 0x73),
                RGBColor(0x80, 0x4d, 0xff),
                RGBColor(0xff, 0x66, 0x00),
                RGBColor(0xee, 0x1a, 0x7a),
                RGBColor(0x66, 0x99, 0xff),
            ],
            stroke_width: 2,
            band_opacity: 0.1,
            panel_size: (800, 400),
            x_label: "Transition misstep probability".to_owned(),
            obstacle_color: RGBColor(0x80, 0x80, 0x80),
            start_color: RGBColor(0xff, 0x00, 0x00),
            waypoint_color: RGBColor(0x00, 0x80, 0x00),
            reward_field_color: RGBColor(0x00, 0x00, 0xff),
            trajectory_color: RGBColor(0xff, 0x00, 0x00),
        }
    }
}

impl ChartStyle {
    #[must_use]
    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    #[must_use]
    pub fn color(&self, index: usize) -> RGBColor {
        if self.palette.is_empty() {
            return RGBColor(0, 0, 0);
        }
        self.palette[index % self.palette.len()]
    }
}

/// Axis range covering `[lo, hi]` with a 5% margin on both sides.
fn padded_range(lo: f64, hi: f64) -> Range<f64> {
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return 0.0..1.0;
    }
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.05
    } else if lo == 0.0 {
        1.0
    } else {
        lo.abs() * 0.1
    };
    (lo - pad)..(hi + pad)
}

/// Smallest and largest finite value of `values`.
fn value_bounds<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .map(|v| (v, v))
        .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
}

/// Closed polygon approximating a circle in data coordinates.
fn circle_outline(cx: f64, cy: f64, r: f64, segments: usize) -> Vec<(f64, f64)> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            #[expect(clippy::cast_precision_loss)]
            let angle = std::f64::consts::TAU * i as f64 / segments as f64;
            (cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect()
}

fn metric_label(metric: &str, log_transform: bool) -> String {
    if log_transform {
        format!("log({metric})")
    } else {
        metric.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        let range = padded_range(0.0, 10.0);
        assert!((range.start + 0.5).abs() < 1e-12);
        assert!((range.end - 10.5).abs() < 1e-12);

        assert_eq!(padded_range(0.0, 0.0), -1.0..1.0);
        let flat = padded_range(5.0, 5.0);
        assert!(flat.start < 5.0 && flat.end > 5.0);
        assert_eq!(padded_range(f64::NAN, 1.0), 0.0..1.0);
    }

    #[test]
    fn test_value_bounds_skips_non_finite() {
        assert_eq!(
            value_bounds([3.0, f64::NAN, -1.0, f64::INFINITY, 2.0]),
            Some((-1.0, 3.0))
        );
        assert_eq!(value_bounds(Vec::new()), None);
    }

    #[test]
    fn test_circle_outline_is_closed() {
        let points = circle_outline(1.0, 2.0, 0.5, 16);
        assert_eq!(points.len(), 17);
        let (first, last) = (points[0], points[16]);
        assert!((first.0 - last.0).abs() < 1e-12 && (first.1 - last.1).abs() < 1e-12);
        for (x, y) in points {
            let d = ((x - 1.0).powi(2) + (y - 2.0).powi(2)).sqrt();
            assert!((d - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_palette_cycles() {
        let style = ChartStyle::default();
        assert_eq!(style.color(0), style.color(style.palette.len()));
        assert_eq!(style.with_x_label("p").x_label, "p");
        assert_eq!(metric_label("score", true), "log(score)");
    }
}
