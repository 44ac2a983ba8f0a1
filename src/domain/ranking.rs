//! Unit-price ranking of trading partners for a single HS code.
//!
//! A row is eligible when its export weight, import weight and import value
//! are all strictly positive. Exports are ranked by unit price from highest
//! to lowest, imports from lowest to highest, both with stable tie order.

use super::entities::{HsCode, TradeRecord, TradeTable};

/// Stored values are in thousands; multiply back to whole currency units.
pub const VALUE_SCALE: f64 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradeFlow {
    Export,
    Import,
}

impl TradeFlow {
    pub fn label(&self) -> &'static str {
        match self {
            TradeFlow::Export => "Export",
            TradeFlow::Import => "Import",
        }
    }

    pub fn direction(&self) -> SortDirection {
        match self {
            TradeFlow::Export => SortDirection::Descending,
            TradeFlow::Import => SortDirection::Ascending,
        }
    }

    pub fn weight(&self, record: &TradeRecord) -> f64 {
        match self {
            TradeFlow::Export => record.export_weight,
            TradeFlow::Import => record.import_weight,
        }
    }

    pub fn value(&self, record: &TradeRecord) -> f64 {
        match self {
            TradeFlow::Export => record.export_value,
            TradeFlow::Import => record.import_value,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RankedEntry<'a> {
    pub record: &'a TradeRecord,
    pub unit_price: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RankedView<'a> {
    pub flow: TradeFlow,
    pub entries: Vec<RankedEntry<'a>>,
}

impl<'a> RankedView<'a> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RankedViews<'a> {
    pub export: RankedView<'a>,
    pub import: RankedView<'a>,
}

impl<'a> RankedViews<'a> {
    pub fn is_empty(&self) -> bool {
        self.export.is_empty() && self.import.is_empty()
    }
}

/// Price per kg in whole currency units.
pub fn unit_price(value: f64, weight: f64) -> f64 {
    value * VALUE_SCALE / weight
}

pub fn is_eligible(record: &TradeRecord, code: HsCode) -> bool {
    record.hs_code == code
        && record.export_weight > 0.0
        && record.import_weight > 0.0
        && record.import_value > 0.0
}

/// Filters `table` to rows eligible for `code` and ranks them by export and
/// import unit price. An empty or non-matching table yields two empty views.
pub fn rank_by_code(table: &TradeTable, code: HsCode) -> RankedViews<'_> {
    let eligible: Vec<&TradeRecord> = table
        .records()
        .iter()
        .filter(|record| is_eligible(record, code))
        .collect();

    RankedViews {
        export: rank_flow(&eligible, TradeFlow::Export),
        import: rank_flow(&eligible, TradeFlow::Import),
    }
}

fn rank_flow<'a>(eligible: &[&'a TradeRecord], flow: TradeFlow) -> RankedView<'a> {
    let mut entries: Vec<RankedEntry<'a>> = eligible
        .iter()
        .map(|record| RankedEntry {
            record,
            unit_price: unit_price(flow.value(record), flow.weight(record)),
        })
        .collect();

    // sort_by is stable, so equal prices keep table order in both directions.
    entries.sort_by(|a, b| {
        let ord = a.unit_price.total_cmp(&b.unit_price);
        match flow.direction() {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    RankedView { flow, entries }
}

/// First item name recorded for `code`, if any row carries one.
pub fn lookup_item_name(table: &TradeTable, code: HsCode) -> Option<&str> {
    table
        .records()
        .iter()
        .filter(|record| record.hs_code == code)
        .find_map(|record| {
            record
                .item_name
                .as_deref()
                .filter(|name| !name.trim().is_empty())
        })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HsCodeInput {
    Valid(HsCode),
    Invalid,
}

impl HsCodeInput {
    pub fn code(&self) -> Option<HsCode> {
        match self {
            HsCodeInput::Valid(code) => Some(*code),
            HsCodeInput::Invalid => None,
        }
    }
}

/// Accepts digits only, so "03" is code 3 but "-3", "3.0" or "" are rejected.
pub fn parse_hs_code(text: &str) -> HsCodeInput {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return HsCodeInput::Invalid;
    }
    trimmed
        .parse::<HsCode>()
        .map(HsCodeInput::Valid)
        .unwrap_or(HsCodeInput::Invalid)
}

/// Label shown next to the code field.
pub fn item_label(table: &TradeTable, input: HsCodeInput) -> String {
    match input {
        HsCodeInput::Valid(code) => match lookup_item_name(table, code) {
            Some(name) => format!("Item: {name}"),
            None => "No item name for this HS code.".to_string(),
        },
        HsCodeInput::Invalid => "HS code is invalid.".to_string(),
    }
}
