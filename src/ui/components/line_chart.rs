use dioxus::prelude::*;

use crate::domain::FreightSeries;
use crate::ui::chart::{label_indices, point_x, polyline_segments, x_label_transform, Frame, YScale};
use crate::ui::theme::{self, Tone};

const MAX_X_LABELS: usize = 12;

#[derive(Clone, PartialEq)]
struct LineView {
    name: String,
    color: &'static str,
    segments: Vec<String>,
}

/// One polyline per cost column over the series' periods.
#[component]
pub fn LineChart(title: String, y_label: String, series: FreightSeries) -> Element {
    let scale = YScale::from_values(
        series.rows.iter().flat_map(|row| row.values.iter().flatten().copied()),
        false,
    );
    let frame = Frame::new(&scale);
    let lines: Vec<LineView> = series
        .columns
        .iter()
        .enumerate()
        .map(|(idx, name)| LineView {
            name: name.clone(),
            color: theme::series_color(idx),
            segments: polyline_segments(&series.column(idx), &scale),
        })
        .collect();
    let periods = series.periods();
    let count = periods.len();
    let x_labels: Vec<(String, String)> = label_indices(count, MAX_X_LABELS)
        .into_iter()
        .map(|idx| (x_label_transform(point_x(idx, count)), periods[idx].to_string()))
        .collect();
    let ticks = frame.ticks.clone();
    let legend = lines.clone();

    rsx! {
        div { class: "{theme::panel(Tone::Freight)}",
            h2 { class: "panel-title", "{title}" }
            if series.is_empty() {
                p { class: "notice", "No freight data available." }
            } else {
                svg { class: "chart", view_box: "{frame.view_box}", preserve_aspect_ratio: "xMidYMid meet",
                    for tick in ticks {
                        line { class: "grid-line", x1: "{frame.left}", x2: "{frame.right}", y1: "{tick.y}", y2: "{tick.y}" }
                        text { class: "tick-label", x: "{frame.tick_x}", y: "{tick.y}", text_anchor: "end", dominant_baseline: "middle", "{tick.text}" }
                    }
                    line { class: "axis", x1: "{frame.left}", x2: "{frame.right}", y1: "{frame.bottom}", y2: "{frame.bottom}" }
                    line { class: "axis", x1: "{frame.left}", x2: "{frame.left}", y1: "{frame.top}", y2: "{frame.bottom}" }
                    for (transform, period) in x_labels {
                        text { class: "tick-label", transform: "{transform}", text_anchor: "start", "{period}" }
                    }
                    for line_view in lines {
                        for points in line_view.segments {
                            polyline { class: "series", points: "{points}", stroke: line_view.color, fill: "none" }
                        }
                    }
                    text { class: "axis-title", transform: "{frame.y_title_transform}", text_anchor: "middle", "{y_label}" }
                }
                ul { class: "legend",
                    for line_view in legend {
                        li {
                            span { class: "legend-swatch", background: line_view.color }
                            "{line_view.name}"
                        }
                    }
                }
            }
        }
    }
}
