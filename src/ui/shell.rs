use dioxus::prelude::*;

use crate::app::Route;
use crate::domain::AppState;
use crate::ui::theme::{self, Tone};
use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    let subtitle = state.with(|st| {
        st.trade
            .data()
            .map(|table| format!("{} rows, {} HS codes", table.len(), table.distinct_codes()))
            .unwrap_or_else(|| "No trade table loaded".to_string())
    });

    rsx! {
        div { class: "app",
            header { class: "app-header",
                div {
                    h1 { class: "app-title", "{APP_NAME}" }
                    p { class: "app-subtitle", "{subtitle}" }
                }
                nav { class: "nav",
                    NavButton { active: matches!(current_route, Route::Ranking {}), onclick: move |_| { nav.push(Route::Ranking {}); }, label: "Ranking", tone: Tone::Export }
                    NavButton { active: matches!(current_route, Route::Freight {}), onclick: move |_| { nav.push(Route::Freight {}); }, label: "Freight", tone: Tone::Freight }
                    NavButton { active: matches!(current_route, Route::Settings {}), onclick: move |_| { nav.push(Route::Settings {}); }, label: "Settings", tone: Tone::Neutral }
                }
            }
            main { class: "app-main",
                {children}
            }
            footer { class: "app-footer", "{version_label()}" }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str, tone: Tone) -> Element {
    rsx! {
        button {
            class: theme::btn_toggle(tone, active),
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
