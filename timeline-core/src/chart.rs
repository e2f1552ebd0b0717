//! Render models for the agent line chart and the compute gauge.
//!
//! Both charts accept whatever the dataset holds and normalise it: missing
//! points become 0, values are clamped to the 0–100 axis, and `NaN` counts as 0.

use serde::Serialize;

use crate::GraphSeries;

/// X axis labels of the agent chart.
pub const YEAR_LABELS: [&str; 5] = ["2000", "2005", "2010", "2015", "2020"];

pub const UNRELIABLE_COLOR: &str = "#22c55e";
pub const RELIABLE_COLOR: &str = "#ef4444";
pub const NEUTRAL_COLOR: &str = "#6b7280";

pub const GAUGE_FILL_COLOR: &str = "#22c55e";
pub const GAUGE_TRACK_COLOR: &str = "#e0e0e0";
/// Inner radius of the gauge ring as a fraction of the outer radius.
pub const GAUGE_CUTOUT: f64 = 0.8;

const AXIS_MAX: f64 = 100.0;

pub fn series_color(label: &str) -> &'static str {
    match label {
        "Unreliable" => UNRELIABLE_COLOR,
        "Reliable" => RELIABLE_COLOR,
        _ => NEUTRAL_COLOR,
    }
}

pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, AXIS_MAX)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub color: &'static str,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn from_graph(series: &GraphSeries) -> Self {
        let values = (0..YEAR_LABELS.len())
            .map(|idx| sanitize(series.data.get(idx).copied().unwrap_or(0.0)))
            .collect();
        Self {
            label: series.label.clone(),
            color: series_color(&series.label),
            values,
        }
    }

    /// `x,y` pairs for an SVG polyline inside a `width` × `height` box.
    pub fn svg_points(&self, width: f64, height: f64) -> String {
        let step = width / (YEAR_LABELS.len() - 1) as f64;
        self.values
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                let x = step * idx as f64;
                let y = height - value / AXIS_MAX * height;
                format!("{x:.1},{y:.1}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct LineChartModel {
    pub series: Vec<ChartSeries>,
}

impl LineChartModel {
    pub fn from_graph_data(graph_data: &[GraphSeries]) -> Self {
        Self {
            series: graph_data.iter().map(ChartSeries::from_graph).collect(),
        }
    }

    /// Eased blend between two charts at linear progress `t`. Series are
    /// matched by label; a series new in `to` rises from the baseline.
    pub fn tween(from: &LineChartModel, to: &LineChartModel, t: f64) -> Self {
        let eased = ease_in_out_cubic(t);
        let series = to
            .series
            .iter()
            .map(|target| {
                let source = from.series.iter().find(|s| s.label == target.label);
                let values = target
                    .values
                    .iter()
                    .enumerate()
                    .map(|(idx, end)| {
                        let start = source
                            .and_then(|s| s.values.get(idx).copied())
                            .unwrap_or(0.0);
                        start + (end - start) * eased
                    })
                    .collect();
                ChartSeries {
                    label: target.label.clone(),
                    color: target.color,
                    values,
                }
            })
            .collect();
        Self { series }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Doughnut showing `value` out of 100.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct GaugeModel {
    pub value: f64,
}

impl GaugeModel {
    pub fn new(value: f64) -> Self {
        Self {
            value: sanitize(value),
        }
    }

    /// `[filled, remaining]`, summing to 100.
    pub fn segments(&self) -> [f64; 2] {
        [self.value, AXIS_MAX - self.value]
    }

    pub fn tween(from: &GaugeModel, to: &GaugeModel, t: f64) -> Self {
        let eased = ease_in_out_cubic(t);
        Self::new(from.value + (to.value - from.value) * eased)
    }

    /// Stroke width and radius of the ring drawn in a square of side `size`.
    pub fn ring(size: f64) -> (f64, f64) {
        let outer = size / 2.0;
        let stroke = outer * (1.0 - GAUGE_CUTOUT);
        (stroke, outer - stroke / 2.0)
    }

    /// `stroke-dasharray` value for a ring of radius `radius`.
    pub fn dash_array(&self, radius: f64) -> String {
        let circumference = 2.0 * std::f64::consts::PI * radius;
        let filled = circumference * self.value / AXIS_MAX;
        format!("{filled:.2} {:.2}", circumference - filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(label: &str, data: &[f64]) -> GraphSeries {
        GraphSeries {
            label: label.to_string(),
            data: data.to_vec(),
        }
    }

    #[test]
    fn colours_follow_series_label() {
        assert_eq!(series_color("Unreliable"), UNRELIABLE_COLOR);
        assert_eq!(series_color("Reliable"), RELIABLE_COLOR);
        assert_eq!(series_color("Other"), NEUTRAL_COLOR);
    }

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!(ease_in_out_cubic(0.25) < 0.25);
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn series_is_padded_and_clamped() {
        let series = ChartSeries::from_graph(&graph("Reliable", &[10.0, f64::NAN, 140.0]));
        assert_eq!(series.values, vec![10.0, 0.0, 100.0, 0.0, 0.0]);
        assert_eq!(series.svg_points(100.0, 50.0), "0.0,45.0 25.0,50.0 50.0,0.0 75.0,50.0 100.0,50.0");
    }

    #[test]
    fn tween_matches_series_by_label() {
        let from = LineChartModel::from_graph_data(&[graph("Reliable", &[0.0; 5])]);
        let to = LineChartModel::from_graph_data(&[
            graph("Unreliable", &[40.0; 5]),
            graph("Reliable", &[80.0; 5]),
        ]);

        let mid = LineChartModel::tween(&from, &to, 0.5);
        assert_eq!(mid.series[0].values[0], 20.0);
        assert_eq!(mid.series[1].values[4], 40.0);
        assert_eq!(LineChartModel::tween(&from, &to, 1.0), to);
    }

    #[test]
    fn gauge_segments_sum_to_hundred() {
        assert_eq!(GaugeModel::new(65.0).segments(), [65.0, 35.0]);
        assert_eq!(GaugeModel::new(-5.0).segments(), [0.0, 100.0]);
        assert_eq!(GaugeModel::new(f64::NAN).value, 0.0);
    }

    #[test]
    fn gauge_tween_is_eased() {
        let from = GaugeModel::new(20.0);
        let to = GaugeModel::new(60.0);
        assert_eq!(GaugeModel::tween(&from, &to, 0.5).value, 40.0);
        assert!(GaugeModel::tween(&from, &to, 0.25).value < 30.0);
        assert_eq!(GaugeModel::tween(&from, &to, 1.0), to);
    }

    #[test]
    fn gauge_ring_uses_cutout() {
        let (stroke, radius) = GaugeModel::ring(100.0);
        assert!((stroke - 10.0).abs() < 1e-9);
        assert!((radius - 45.0).abs() < 1e-9);
    }
}
