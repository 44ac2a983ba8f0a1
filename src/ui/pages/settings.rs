use std::{path::PathBuf, time::Duration};

use dioxus::prelude::*;

use crate::{
    app::{current_table, freight_paths, persist_user_state, DataReload},
    domain::{AppState, DataSources, LoadState},
    infra::export_cleaned_table,
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme::{self, Tone},
    },
    util::persistence::export_dir,
};

pub fn humanize_age(age: Duration) -> String {
    let age = age.as_secs();
    if age < 60 {
        format!("{age}s ago")
    } else if age < 3_600 {
        format!("{}m ago", age / 60)
    } else if age < 86_400 {
        format!("{}h ago", age / 3_600)
    } else {
        format!("{}d ago", age / 86_400)
    }
}

/// One-line status for a data file, e.g. "1200 rows, 3 skipped, 2m ago".
pub fn status_line<T>(state: &LoadState<T>, rows: impl Fn(&T) -> usize) -> String {
    match state {
        LoadState::NotLoaded => "Not loaded".to_string(),
        LoadState::Failed(message) => format!("Failed: {message}"),
        LoadState::Loaded {
            data, skipped_rows, ..
        } => {
            let age = state.age().map(humanize_age).unwrap_or_else(|| "just now".to_string());
            if *skipped_rows > 0 {
                format!("{} rows, {skipped_rows} skipped, {age}", rows(data))
            } else {
                format!("{} rows, {age}", rows(data))
            }
        }
    }
}

fn status_class<T>(state: &LoadState<T>) -> &'static str {
    match state {
        LoadState::Failed(_) => "notice-error",
        _ => "muted",
    }
}

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let reload = use_context::<DataReload>();

    let initial = state.with(|st| st.sources.clone());
    let mut trade_input = use_signal(|| initial.trade_table.display().to_string());
    let mut sea_export_input = use_signal(|| initial.sea_export.display().to_string());
    let mut sea_import_input = use_signal(|| initial.sea_import.display().to_string());
    let mut air_input = use_signal(|| initial.air.display().to_string());

    let statuses: Vec<(&'static str, String, String, &'static str)> = state.with(|st| {
        let mut lines = vec![(
            "Trade table",
            st.sources.trade_table.display().to_string(),
            status_line(&st.trade, |table| table.len()),
            status_class(&st.trade),
        )];
        for (chart, path) in freight_paths(&st.sources) {
            let load = st.freight_state(chart);
            lines.push((
                chart.title(),
                path.display().to_string(),
                status_line(&load, |series| series.rows.len()),
                status_class(&load),
            ));
        }
        lines
    });

    let on_apply = {
        let mut state = state;
        move |_| {
            let sources = DataSources {
                trade_table: PathBuf::from(trade_input().trim()),
                sea_export: PathBuf::from(sea_export_input().trim()),
                sea_import: PathBuf::from(sea_import_input().trim()),
                air: PathBuf::from(air_input().trim()),
            };
            state.with_mut(|st| st.sources = sources);
            persist_user_state(&state);
            reload.request();
            push_toast(toasts, ToastKind::Info, "Reloading data files...");
        }
    };

    let on_reset = {
        let mut state = state;
        move |_| {
            let defaults = DataSources::default();
            trade_input.set(defaults.trade_table.display().to_string());
            sea_export_input.set(defaults.sea_export.display().to_string());
            sea_import_input.set(defaults.sea_import.display().to_string());
            air_input.set(defaults.air.display().to_string());
            state.with_mut(|st| st.sources = defaults);
            persist_user_state(&state);
            reload.request();
            push_toast(toasts, ToastKind::Info, "Restored default file locations.");
        }
    };

    let on_export = move |_| {
        let Some(table) = current_table(&state) else {
            push_toast(toasts, ToastKind::Warning, "Load a trade table before exporting.");
            return;
        };
        let Some(dir) = export_dir() else {
            push_toast(toasts, ToastKind::Error, "No data directory available for exports.");
            return;
        };
        spawn(async move {
            let outcome =
                tokio::task::spawn_blocking(move || export_cleaned_table(&dir, &table)).await;
            match outcome {
                Ok(Ok((path, rows))) => push_toast(
                    toasts,
                    ToastKind::Success,
                    format!("Wrote {rows} rows to {}", path.display()),
                ),
                Ok(Err(err)) => push_toast(toasts, ToastKind::Error, format!("Export failed: {err}")),
                Err(err) => push_toast(toasts, ToastKind::Error, format!("Export aborted: {err}")),
            }
        });
    };

    rsx! {
        section { class: "page",
            h1 { class: "page-title", "Settings" }
            div { class: "{theme::panel(Tone::Neutral)}",
                h2 { class: "panel-title", "Data files" }
                p { class: "muted", "Relative paths resolve against the directory the app was started from." }
                PathField { label: "Trade table (HS code, country, weights, values)", value: trade_input }
                PathField { label: "Sea freight, export", value: sea_export_input }
                PathField { label: "Sea freight, import", value: sea_import_input }
                PathField { label: "Air freight", value: air_input }
                div { class: "toolbar",
                    button { class: theme::btn_primary(Tone::Neutral), onclick: on_apply, "Apply & reload" }
                    button { class: theme::btn_ghost(), onclick: on_reset, "Reset defaults" }
                }
            }

            div { class: "{theme::panel(Tone::Neutral)}",
                h2 { class: "panel-title", "Load status" }
                ul { class: "source-list",
                    for (name, path, status, class) in statuses {
                        li { class: "source-item",
                            span { "{name}" }
                            span { class: "muted", "{path}" }
                            span { class: class, "{status}" }
                        }
                    }
                }
            }

            div { class: "{theme::panel(Tone::Neutral)}",
                h2 { class: "panel-title", "Cleaned export" }
                p { class: "muted",
                    "Writes the trade table without rows whose weights, values and balance are all zero."
                }
                button { class: theme::btn_primary(Tone::Neutral), onclick: on_export, "Export cleaned CSV" }
            }
        }
    }
}

#[component]
fn PathField(label: &'static str, value: Signal<String>) -> Element {
    let mut value = value;
    rsx! {
        label { class: "field",
            span { class: "field-label", "{label}" }
            input {
                class: theme::input_class(),
                r#type: "text",
                value: "{value}",
                oninput: move |evt| value.set(evt.value()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::SystemTime};

    use super::*;

    #[test]
    fn ages_are_bucketed() {
        assert_eq!(humanize_age(Duration::from_secs(5)), "5s ago");
        assert_eq!(humanize_age(Duration::from_secs(125)), "2m ago");
        assert_eq!(humanize_age(Duration::from_secs(7_200)), "2h ago");
        assert_eq!(humanize_age(Duration::from_secs(172_800)), "2d ago");
    }

    #[test]
    fn status_mentions_skipped_rows() {
        let state = LoadState::Loaded {
            data: Arc::new(vec![1, 2, 3]),
            loaded_at: SystemTime::now(),
            skipped_rows: 2,
        };
        let line = status_line(&state, |rows| rows.len());
        assert!(line.starts_with("3 rows, 2 skipped, "), "{line}");

        let failed: LoadState<Vec<u8>> = LoadState::Failed("missing".to_string());
        assert_eq!(status_line(&failed, |rows| rows.len()), "Failed: missing");
    }
}
