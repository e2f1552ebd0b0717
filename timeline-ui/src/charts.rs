#![cfg(target_arch = "wasm32")]

use timeline_core::chart::{
    GaugeModel, LineChartModel, GAUGE_FILL_COLOR, GAUGE_TRACK_COLOR, YEAR_LABELS,
};
use timeline_core::{GraphSeries, Stat};
use yew::prelude::*;

use crate::frame_loop::use_tween;

const CHART_WIDTH: f64 = 400.0;
const CHART_HEIGHT: f64 = 200.0;
const GRID_LINES: [f64; 5] = [0.0, 25.0, 50.0, 75.0, 100.0];
const GAUGE_SIZE: f64 = 160.0;

#[derive(Properties, PartialEq)]
pub struct AgentChartProps {
    pub graph_data: Vec<GraphSeries>,
    pub transition_ms: u32,
}

#[function_component(AgentChart)]
pub fn agent_chart(props: &AgentChartProps) -> Html {
    let target = LineChartModel::from_graph_data(&props.graph_data);
    let model = use_tween(target, props.transition_ms, LineChartModel::tween);

    let step = CHART_WIDTH / (YEAR_LABELS.len() - 1) as f64;

    html! {
        <figure class="agent-chart" aria-hidden="true">
            <svg
                viewBox={format!("-8 -8 {} {}", CHART_WIDTH + 16.0, CHART_HEIGHT + 16.0)}
                preserveAspectRatio="none"
            >
                {
                    for GRID_LINES.iter().map(|value| {
                        let y = CHART_HEIGHT - value / 100.0 * CHART_HEIGHT;
                        html! {
                            <line class="chart-grid" x1="0" x2={CHART_WIDTH.to_string()} y1={y.to_string()} y2={y.to_string()} />
                        }
                    })
                }
                {
                    for model.series.iter().map(|series| html! {
                        <polyline
                            class="chart-line"
                            points={series.svg_points(CHART_WIDTH, CHART_HEIGHT)}
                            stroke={series.color}
                            data-series={series.label.clone()}
                        />
                    })
                }
            </svg>
            <figcaption class="chart-axis">
                {
                    for YEAR_LABELS.iter().enumerate().map(|(idx, label)| html! {
                        <span style={format!("left: {:.2}%", step * idx as f64 / CHART_WIDTH * 100.0)}>{ *label }</span>
                    })
                }
            </figcaption>
        </figure>
    }
}

#[derive(Properties, PartialEq)]
pub struct ComputeGaugeProps {
    pub value: f64,
    pub transition_ms: u32,
}

#[function_component(ComputeGauge)]
pub fn compute_gauge(props: &ComputeGaugeProps) -> Html {
    let model = use_tween(GaugeModel::new(props.value), props.transition_ms, GaugeModel::tween);
    let (stroke, radius) = GaugeModel::ring(GAUGE_SIZE);
    let center = GAUGE_SIZE / 2.0;
    let stroke_width = stroke.to_string();

    html! {
        <svg class="compute-gauge" viewBox={format!("0 0 {GAUGE_SIZE} {GAUGE_SIZE}")} aria-hidden="true">
            <circle
                cx={center.to_string()}
                cy={center.to_string()}
                r={radius.to_string()}
                fill="none"
                stroke={GAUGE_TRACK_COLOR}
                stroke-width={stroke_width.clone()}
            />
            <circle
                class="gauge-fill"
                cx={center.to_string()}
                cy={center.to_string()}
                r={radius.to_string()}
                fill="none"
                stroke={GAUGE_FILL_COLOR}
                stroke-width={stroke_width}
                stroke-dasharray={model.dash_array(radius)}
                transform={format!("rotate(-90 {center} {center})")}
            />
        </svg>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatsGridProps {
    pub stats: Vec<Stat>,
}

#[function_component(StatsGrid)]
pub fn stats_grid(props: &StatsGridProps) -> Html {
    html! {
        <div class="stats-grid">
            {
                for props.stats.iter().map(|stat| html! {
                    <div class="stat-cell">
                        <span class="stat-value mono">{ stat.value.clone() }</span>
                        <span class="stat-label">{ stat.label.clone() }</span>
                    </div>
                })
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct IconRowProps {
    pub icons: Vec<String>,
}

#[function_component(IconRow)]
pub fn icon_row(props: &IconRowProps) -> Html {
    html! {
        <div class="icon-row">
            <div class="icon-captions mono">
                <span>{"Currently Exists"}</span>
                <span>{"Emerging Tech"}</span>
                <span>{"Science Fiction"}</span>
            </div>
            <div class="icon-track">
                { for props.icons.iter().map(|icon| html! { <span class="timeline-icon">{ icon.clone() }</span> }) }
            </div>
        </div>
    }
}

/// Capability chips under the agent chart.
const CAPABILITIES: [(&str, &str); 6] = [
    ("Hacking", "M12 18h.01M8 21h8a2 2 0 002-2V5a2 2 0 00-2-2H8a2 2 0 00-2 2v14a2 2 0 002 2z"),
    ("Bioweapons", "M13 10V3L4 14h7v7l9-11h-7z"),
    ("Coding", "M10 20l4-16m4 4l4 4-4 4M6 16l-4-4 4-4"),
    ("Robotics", "M21 12a9 9 0 11-18 0 9 9 0 0118 0z"),
    ("Politics", "M17 20h2a2 2 0 002-2V8a2 2 0 00-2-2h-2m-4-2H9a2 2 0 00-2 2v14a2 2 0 002 2h6a2 2 0 002-2V4z"),
    ("Forecasting", "M9 19v-6a2 2 0 00-2-2H5a2 2 0 00-2 2v6a2 2 0 002 2h2a2 2 0 002-2zm0 0V9a2 2 0 012-2h2a2 2 0 012 2v10m-6 0a2 2 0 002 2h2a2 2 0 002-2m-6 0h2m-4 0v-7a2 2 0 012-2h2a2 2 0 012 2v7"),
];

#[function_component(CapabilityGrid)]
pub fn capability_grid() -> Html {
    html! {
        <ul class="capability-grid">
            {
                for CAPABILITIES.iter().map(|(label, path)| html! {
                    <li class="capability">
                        <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" aria-hidden="true">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d={*path} />
                        </svg>
                        <span>{ *label }</span>
                    </li>
                })
            }
        </ul>
    }
}
