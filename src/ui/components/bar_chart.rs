use dioxus::prelude::*;

use crate::ui::chart::{self, layout_bars, Frame};
use crate::ui::theme::{self, Tone};

#[derive(Clone, PartialEq)]
struct BarView {
    x: String,
    y: String,
    width: String,
    height: String,
    tooltip: String,
    label: String,
    label_transform: String,
}

/// Vertical bar chart with one bar per label, drawn in the tone's accent colour.
#[component]
pub fn BarChart(title: String, y_label: String, points: Vec<(String, f64)>, tone: Tone) -> Element {
    let (bars, scale) = layout_bars(&points);
    let frame = Frame::new(&scale);
    let fill = theme::accent_color(tone);
    let bars: Vec<BarView> = bars
        .into_iter()
        .map(|bar| BarView {
            x: format!("{:.1}", bar.x),
            y: format!("{:.1}", bar.y),
            width: format!("{:.1}", bar.width),
            height: format!("{:.1}", bar.height),
            tooltip: format!("{}: {:.6}", bar.label, bar.value),
            label_transform: chart::x_label_transform(bar.x + bar.width / 2.0),
            label: bar.label,
        })
        .collect();
    let ticks = frame.ticks.clone();

    rsx! {
        div { class: "{theme::panel(tone)}",
            h2 { class: "panel-title", "{title}" }
            if bars.is_empty() {
                p { class: "muted", "Nothing to plot for this HS code." }
            } else {
                svg { class: "chart", view_box: "{frame.view_box}", preserve_aspect_ratio: "xMidYMid meet",
                    for tick in ticks {
                        line { class: "grid-line", x1: "{frame.left}", x2: "{frame.right}", y1: "{tick.y}", y2: "{tick.y}" }
                        text { class: "tick-label", x: "{frame.tick_x}", y: "{tick.y}", text_anchor: "end", dominant_baseline: "middle", "{tick.text}" }
                    }
                    line { class: "axis", x1: "{frame.left}", x2: "{frame.right}", y1: "{frame.bottom}", y2: "{frame.bottom}" }
                    line { class: "axis", x1: "{frame.left}", x2: "{frame.left}", y1: "{frame.top}", y2: "{frame.bottom}" }
                    for bar in bars {
                        rect {
                            class: "series",
                            x: "{bar.x}",
                            y: "{bar.y}",
                            width: "{bar.width}",
                            height: "{bar.height}",
                            fill: fill,
                            title { "{bar.tooltip}" }
                        }
                        text { class: "tick-label", transform: "{bar.label_transform}", text_anchor: "start", "{bar.label}" }
                    }
                    text { class: "axis-title", transform: "{frame.y_title_transform}", text_anchor: "middle", "{y_label}" }
                }
            }
        }
    }
}
