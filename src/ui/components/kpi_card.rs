use dioxus::prelude::*;

use crate::ui::theme::{self, Tone};

#[component]
pub fn KpiCard(title: String, value: String, description: Option<String>, tone: Tone) -> Element {
    rsx! {
        div { class: "{theme::panel(tone)}",
            h3 { class: "kpi-title", "{title}" }
            p { class: "kpi-value", "{value}" }
            if let Some(desc) = description {
                p { class: "kpi-desc", "{desc}" }
            }
        }
    }
}
