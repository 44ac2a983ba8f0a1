//! Text formatting for ranked rows and the copyable rank report.

use super::ranking::{RankedEntry, RankedView, TradeFlow, VALUE_SCALE};

/// Display-ready cells for one ranked row.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedRowText {
    pub rank: usize,
    pub country: String,
    pub weight: String,
    pub value: String,
    pub unit_price: String,
}

pub fn format_weight(weight: f64) -> String {
    format!("{weight:.1}")
}

/// Stored thousands rendered as whole dollars, e.g. `1234.5` -> `$1,234,500`.
pub fn format_value(value_thousands: f64) -> String {
    format_currency(value_thousands * VALUE_SCALE)
}

pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "n/a".to_string();
    }
    let rounded = format!("{:.0}", amount.abs());
    let sign = if amount < 0.0 && rounded != "0" { "-" } else { "" };
    format!("{sign}${}", group_thousands(&rounded))
}

pub fn format_unit_price(price: f64) -> String {
    format!("${price:.6}")
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn row_text(rank: usize, entry: &RankedEntry<'_>, flow: TradeFlow) -> RankedRowText {
    RankedRowText {
        rank,
        country: entry.record.country.clone(),
        weight: format_weight(flow.weight(entry.record)),
        value: format_value(flow.value(entry.record)),
        unit_price: format_unit_price(entry.unit_price),
    }
}

pub fn view_rows(view: &RankedView<'_>) -> Vec<RankedRowText> {
    view.entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| row_text(idx + 1, entry, view.flow))
        .collect()
}

/// Plain-text listing of a view, one bracketed line per country.
pub fn rank_report(view: &RankedView<'_>) -> String {
    let flow = view.flow.label();
    let mut lines = vec![format!(
        "{flow} ranking [rank] [country] [{flow} weight (kg)] [{flow} value ($)] [{flow} unit price ($/kg)]"
    )];
    for row in view_rows(view) {
        lines.push(format!(
            "[{}] [{}] [{}kg] [{}] [{}/kg]",
            row.rank, row.country, row.weight, row.value, row.unit_price
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{rank_by_code, TradeRecord, TradeTable};

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1000.0), "$1,000");
        assert_eq!(format_currency(1234567.0), "$1,234,567");
        assert_eq!(format_currency(-4200.0), "-$4,200");
        assert_eq!(format_currency(f64::NAN), "n/a");
    }

    #[test]
    fn value_is_scaled_from_thousands() {
        assert_eq!(format_value(1234.5), "$1,234,500");
        assert_eq!(format_value(2.0), "$2,000");
    }

    #[test]
    fn weight_and_unit_price_precision() {
        assert_eq!(format_weight(12.345), "12.3");
        assert_eq!(format_weight(5.0), "5.0");
        assert_eq!(format_unit_price(200.0), "$200.000000");
        assert_eq!(format_unit_price(1.0 / 3.0), "$0.333333");
    }

    #[test]
    fn report_lists_each_country_with_rank() {
        let table = TradeTable::new(vec![TradeRecord {
            hs_code: 3,
            country: "B".to_string(),
            export_weight: 5.0,
            export_value: 1.0,
            import_weight: 4.0,
            import_value: 2.0,
            trade_balance: -1.0,
            item_name: None,
        }]);
        let views = rank_by_code(&table, 3);

        let report = rank_report(&views.export);
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Export ranking"));
        assert_eq!(lines[1], "[1] [B] [5.0kg] [$1,000] [$200.000000/kg]");

        let rows = view_rows(&views.import);
        assert_eq!(rows[0].value, "$2,000");
        assert_eq!(rows[0].weight, "4.0");
        assert_eq!(rows[0].unit_price, "$500.000000");
    }
}
