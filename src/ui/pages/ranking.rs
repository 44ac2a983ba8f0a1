use dioxus::prelude::*;

use crate::{
    app::persist_user_state,
    domain::{
        format::format_unit_price, item_label, parse_hs_code, rank_by_code, rank_report,
        view_rows, AppState, HsCode, HsCodeInput, LoadState, RankedRowText, RankedView,
        ResultView, TradeFlow, TradeTable,
    },
    ui::{
        components::{BarChart, KpiCard, RankedTable},
        theme::{self, Tone},
    },
};

/// Owned, render-ready projection of one flow's ranking.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowResult {
    pub flow: TradeFlow,
    pub rows: Vec<RankedRowText>,
    pub points: Vec<(String, f64)>,
    pub report: String,
    /// Country at rank 1 with its formatted unit price.
    pub leader: Option<(String, String)>,
}

impl FlowResult {
    fn from_view(view: &RankedView<'_>) -> Self {
        Self {
            flow: view.flow,
            rows: view_rows(view),
            points: view
                .entries
                .iter()
                .map(|entry| (entry.record.country.clone(), entry.unit_price))
                .collect(),
            report: rank_report(view),
            leader: view.entries.first().map(|entry| {
                (
                    entry.record.country.clone(),
                    format_unit_price(entry.unit_price),
                )
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RankingResult {
    pub code: HsCode,
    pub export: FlowResult,
    pub import: FlowResult,
    empty: bool,
}

impl RankingResult {
    pub fn is_empty(&self) -> bool {
        self.empty
    }
}

/// Ranks `table` for the parsed input; invalid input yields no result.
pub fn ranking_result(table: &TradeTable, input: HsCodeInput) -> Option<RankingResult> {
    let code = input.code()?;
    let views = rank_by_code(table, code);
    Some(RankingResult {
        code,
        export: FlowResult::from_view(&views.export),
        import: FlowResult::from_view(&views.import),
        empty: views.is_empty(),
    })
}

#[component]
pub fn RankingPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let (input_text, result_view, trade) =
        state.with(|st| (st.hs_code_input.clone(), st.result_view, st.trade.clone()));
    let parsed = parse_hs_code(&input_text);
    let item_line = trade.data().map(|table| {
        let class = match parsed {
            HsCodeInput::Valid(_) => "item-label",
            HsCodeInput::Invalid => "item-label invalid",
        };
        (class, item_label(&table, parsed))
    });

    let mut state_mut = state;

    rsx! {
        section { class: "page",
            h1 { class: "page-title", "Unit price ranking" }
            p { class: "page-lead",
                "Enter an HS code to rank trading partners by export and import price per kilogram."
            }
            div { class: "{theme::panel(Tone::Neutral)}",
                div { class: "toolbar",
                    label { class: "field grow",
                        span { class: "field-label", "HS code" }
                        input {
                            class: theme::input_class(),
                            r#type: "text",
                            placeholder: "e.g. 3",
                            value: "{input_text}",
                            oninput: move |evt| state_mut.with_mut(|st| st.hs_code_input = evt.value()),
                            onchange: move |_| persist_user_state(&state),
                        }
                    }
                    div { class: "field",
                        span { class: "field-label", "Show as" }
                        div { class: "toolbar",
                            button {
                                class: theme::btn_toggle(Tone::Neutral, result_view == ResultView::Table),
                                onclick: move |_| {
                                    state_mut.with_mut(|st| st.result_view = ResultView::Table);
                                    persist_user_state(&state_mut);
                                },
                                "Table"
                            }
                            button {
                                class: theme::btn_toggle(Tone::Neutral, result_view == ResultView::Graph),
                                onclick: move |_| {
                                    state_mut.with_mut(|st| st.result_view = ResultView::Graph);
                                    persist_user_state(&state_mut);
                                },
                                "Graph"
                            }
                        }
                    }
                }
                if let Some((class, label)) = item_line {
                    p { class: class, "{label}" }
                }
            }
            match trade {
                LoadState::NotLoaded => rsx! {
                    p { class: "muted", "Loading trade table…" }
                },
                LoadState::Failed(message) => rsx! {
                    div { class: "notice notice-error",
                        p { "The trade table could not be loaded: {message}" }
                        p { class: "muted", "Check the file path on the Settings page and reload." }
                    }
                },
                LoadState::Loaded { data, .. } => rsx! {
                    RankingResults { result: ranking_result(&data, parsed), view: result_view }
                },
            }
        }
    }
}

#[component]
fn RankingResults(result: Option<RankingResult>, view: ResultView) -> Element {
    let Some(result) = result else {
        return rsx! {
            div { class: "notice notice-warn", "Enter a numeric HS code to see results." }
        };
    };

    let countries = result.export.rows.len();
    let export_leader = result.export.leader.clone();
    let import_leader = result.import.leader.clone();

    rsx! {
        div { class: "kpi-grid",
            KpiCard {
                title: "Eligible countries".to_string(),
                value: countries.to_string(),
                description: Some(format!("HS code {}", result.code)),
                tone: Tone::Neutral,
            }
            KpiCard {
                title: "Highest export price".to_string(),
                value: export_leader.as_ref().map(|(_, price)| format!("{price}/kg")).unwrap_or_else(|| "-".to_string()),
                description: export_leader.map(|(country, _)| country),
                tone: Tone::Export,
            }
            KpiCard {
                title: "Lowest import price".to_string(),
                value: import_leader.as_ref().map(|(_, price)| format!("{price}/kg")).unwrap_or_else(|| "-".to_string()),
                description: import_leader.map(|(country, _)| country),
                tone: Tone::Import,
            }
        }
        if result.is_empty() {
            div { class: "notice",
                "No country has positive export and import figures for HS code {result.code}."
            }
        } else {
            for flow in [result.export.clone(), result.import.clone()] {
                FlowPanel { key: "{flow.flow.label()}", flow, view }
            }
        }
    }
}

#[component]
fn FlowPanel(flow: FlowResult, view: ResultView) -> Element {
    let tone = Tone::from(flow.flow);
    let label = flow.flow.label();
    let order = match flow.flow {
        TradeFlow::Export => "highest first",
        TradeFlow::Import => "lowest first",
    };
    rsx! {
        match view {
            ResultView::Table => rsx! {
                RankedTable { flow: flow.flow, rows: flow.rows.clone() }
            },
            ResultView::Graph => rsx! {
                BarChart {
                    title: format!("{label} unit price by country ({order})"),
                    y_label: format!("{label} unit price ($/kg)"),
                    points: flow.points.clone(),
                    tone,
                }
            },
        }
        details { class: "{theme::panel(tone)}",
            summary { class: "panel-title", "{label} rank report" }
            textarea {
                class: "report",
                readonly: true,
                rows: "8",
                value: "{flow.report}",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TradeRecord;

    fn row(country: &str, ew: f64, ev: f64, iw: f64, iv: f64) -> TradeRecord {
        TradeRecord {
            hs_code: 3,
            country: country.to_string(),
            export_weight: ew,
            export_value: ev,
            import_weight: iw,
            import_value: iv,
            trade_balance: 0.0,
            item_name: Some("Fish".to_string()),
        }
    }

    #[test]
    fn invalid_input_has_no_result() {
        let table = TradeTable::new(vec![row("A", 10.0, 2.0, 1.0, 1.0)]);
        assert!(ranking_result(&table, HsCodeInput::Invalid).is_none());
    }

    #[test]
    fn result_carries_rows_points_and_leaders() {
        let table = TradeTable::new(vec![
            row("A", 10.0, 2.0, 4.0, 2.0),
            row("B", 5.0, 1.0, 1.0, 1.0),
            row("C", 0.0, 1.0, 1.0, 1.0),
        ]);
        let result = ranking_result(&table, HsCodeInput::Valid(3)).unwrap();

        assert_eq!(result.export.rows.len(), 2);
        assert_eq!(result.export.points, vec![("A".to_string(), 200.0), ("B".to_string(), 200.0)]);
        assert_eq!(result.import.leader, Some(("A".to_string(), "$500.000000".to_string())));
        assert!(result.export.report.starts_with("Export ranking"));
        assert!(!result.is_empty());
    }

    #[test]
    fn unknown_code_is_an_empty_result() {
        let table = TradeTable::new(vec![row("A", 10.0, 2.0, 4.0, 2.0)]);
        let result = ranking_result(&table, HsCodeInput::Valid(99)).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.export.leader, None);
    }
}
