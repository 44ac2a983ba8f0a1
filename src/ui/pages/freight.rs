use dioxus::prelude::*;

use crate::{
    app::persist_user_state,
    domain::{
        parse_range, AppState, FreightChart, FreightMode, FreightRange, FreightSeries, LoadState,
        PeriodError,
    },
    ui::{
        components::LineChart,
        theme::{self, Tone},
    },
};

/// What one chart slot renders after the range filter is applied.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartContent {
    Loading,
    Failed(String),
    Series(FreightSeries),
}

pub fn chart_content(state: &LoadState<FreightSeries>, range: &FreightRange) -> ChartContent {
    match state {
        LoadState::NotLoaded => ChartContent::Loading,
        LoadState::Failed(message) => ChartContent::Failed(message.clone()),
        LoadState::Loaded { data, .. } => ChartContent::Series(data.within(&range.start, &range.end)),
    }
}

/// Validates the two month fields; a valid pair replaces the active range.
pub fn commit_range(range: &mut FreightRange, start: &str, end: &str) -> Result<(), PeriodError> {
    let (start, end) = parse_range(start, end)?;
    range.start = start.as_str().to_string();
    range.end = end.as_str().to_string();
    Ok(())
}

#[component]
pub fn FreightPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let (mode, range) = state.with(|st| (st.freight_mode, st.freight_range.clone()));

    let mut start_input = use_signal(|| range.start.clone());
    let mut end_input = use_signal(|| range.end.clone());
    let mut range_error = use_signal(|| None::<String>);

    let mut apply_range = move |start: String, end: String| {
        let mut state = state;
        let outcome = state.with_mut(|st| commit_range(&mut st.freight_range, &start, &end));
        match outcome {
            Ok(()) => {
                range_error.set(None);
                persist_user_state(&state);
            }
            Err(err) => {
                tracing::debug!("rejected freight range: {err}");
                range_error.set(Some(err.to_string()));
            }
        }
    };

    let charts: Vec<(FreightChart, ChartContent)> = state.with(|st| {
        mode.charts()
            .iter()
            .map(|chart| (*chart, chart_content(&st.freight_state(*chart), &range)))
            .collect()
    });

    let mut state_mut = state;

    rsx! {
        section { class: "page",
            h1 { class: "page-title", "Freight costs" }
            p { class: "page-lead", "Monthly freight rates per route for the selected period." }
            div { class: "{theme::panel(Tone::Freight)}",
                div { class: "toolbar",
                    for option in [FreightMode::Sea, FreightMode::Air] {
                        button {
                            key: "{option.label()}",
                            class: theme::btn_toggle(Tone::Freight, mode == option),
                            onclick: move |_| state_mut.with_mut(|st| st.freight_mode = option),
                            "{option.label()}"
                        }
                    }
                    label { class: "field",
                        span { class: "field-label", "From" }
                        input {
                            class: theme::input_class(),
                            r#type: "month",
                            value: "{start_input}",
                            oninput: move |evt| {
                                start_input.set(evt.value());
                                apply_range(evt.value(), end_input());
                            },
                        }
                    }
                    label { class: "field",
                        span { class: "field-label", "To" }
                        input {
                            class: theme::input_class(),
                            r#type: "month",
                            value: "{end_input}",
                            oninput: move |evt| {
                                end_input.set(evt.value());
                                apply_range(start_input(), evt.value());
                            },
                        }
                    }
                }
                if let Some(message) = range_error() {
                    p { class: "notice notice-warn",
                        "{message}. Showing {range.start} to {range.end}."
                    }
                }
            }
            for (chart, content) in charts {
                FreightChartPanel { key: "{chart.title()}", chart, content }
            }
        }
    }
}

#[component]
fn FreightChartPanel(chart: FreightChart, content: ChartContent) -> Element {
    match content {
        ChartContent::Loading => rsx! {
            div { class: "{theme::panel(Tone::Freight)}",
                h2 { class: "panel-title", "{chart.title()}" }
                p { class: "muted", "Loading…" }
            }
        },
        ChartContent::Failed(message) => rsx! {
            div { class: "{theme::panel(Tone::Freight)}",
                h2 { class: "panel-title", "{chart.title()}" }
                p { class: "notice", "No freight data available." }
                p { class: "notice notice-error", "{message}" }
            }
        },
        ChartContent::Series(series) => rsx! {
            LineChart {
                title: chart.title().to_string(),
                y_label: chart.unit().to_string(),
                series,
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::SystemTime};

    use super::*;
    use crate::domain::FreightRow;

    fn series() -> FreightSeries {
        FreightSeries {
            columns: vec!["Busan-LA".to_string()],
            rows: ["2018-12", "2019-01", "2024-06", "2024-07"]
                .iter()
                .map(|period| FreightRow {
                    period: period.to_string(),
                    values: vec![Some(1.0)],
                })
                .collect(),
        }
    }

    #[test]
    fn loaded_series_is_cut_to_the_range() {
        let state = LoadState::Loaded {
            data: Arc::new(series()),
            loaded_at: SystemTime::now(),
            skipped_rows: 0,
        };
        let ChartContent::Series(filtered) = chart_content(&state, &FreightRange::default()) else {
            panic!("expected a series");
        };
        assert_eq!(filtered.periods(), vec!["2019-01", "2024-06"]);
    }

    #[test]
    fn failed_and_pending_loads_are_reported() {
        let range = FreightRange::default();
        assert_eq!(chart_content(&LoadState::NotLoaded, &range), ChartContent::Loading);
        assert_eq!(
            chart_content(&LoadState::Failed("gone".to_string()), &range),
            ChartContent::Failed("gone".to_string())
        );
    }

    #[test]
    fn reversed_range_keeps_previous_one() {
        let mut range = FreightRange::default();
        assert!(commit_range(&mut range, "2023-05", "2020-01").is_err());
        assert_eq!(range, FreightRange::default());

        commit_range(&mut range, "2020-01", "2020-12").unwrap();
        assert_eq!(range.start, "2020-01");
        assert_eq!(range.end, "2020-12");
    }

    #[test]
    fn malformed_month_is_rejected() {
        let mut range = FreightRange::default();
        assert!(commit_range(&mut range, "2020-13", "2021-01").is_err());
        assert!(commit_range(&mut range, "", "2021-01").is_err());
    }
}
