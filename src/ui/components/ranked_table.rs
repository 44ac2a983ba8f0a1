use dioxus::prelude::*;

use crate::domain::{RankedRowText, TradeFlow};
use crate::ui::theme::{self, Tone};

#[component]
pub fn RankedTable(flow: TradeFlow, rows: Vec<RankedRowText>) -> Element {
    let tone = Tone::from(flow);
    let label = flow.label();
    let is_empty = rows.is_empty();
    rsx! {
        div { class: "{theme::panel(tone)}",
            h2 { class: "panel-title", "{label} unit price ranking" }
            div { class: "table-wrap",
                table { class: "data",
                    thead {
                        tr {
                            th { class: "num", "#" }
                            th { "Country" }
                            th { class: "num", "{label} weight (kg)" }
                            th { class: "num", "{label} value ($)" }
                            th { class: "num", "{label} unit price ($/kg)" }
                        }
                    }
                    tbody {
                        for row in rows {
                            tr { key: "{row.rank}",
                                td { class: "num", "{row.rank}" }
                                td { "{row.country}" }
                                td { class: "num", "{row.weight}" }
                                td { class: "num", "{row.value}" }
                                td { class: "num", "{row.unit_price}" }
                            }
                        }
                        if is_empty {
                            tr {
                                td { class: "empty", colspan: "5",
                                    "No country reports positive trade for this HS code."
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
