use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// HS-style product classification code.
pub type HsCode = i64;

/// One country's trade figures for a single HS code.
///
/// Values are stored the way the customs export ships them: weights in kg,
/// monetary values in thousands of dollars.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub hs_code: HsCode,
    pub country: String,
    pub export_weight: f64,
    pub export_value: f64,
    pub import_weight: f64,
    pub import_value: f64,
    /// Carried through for export; the ranking never reads it.
    pub trade_balance: f64,
    pub item_name: Option<String>,
}

impl TradeRecord {
    /// True when every numeric column is zero, i.e. the row carries no trade.
    pub fn is_blank(&self) -> bool {
        [
            self.export_weight,
            self.export_value,
            self.import_weight,
            self.import_value,
            self.trade_balance,
        ]
        .iter()
        .all(|value| *value == 0.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TradeTable {
    records: Vec<TradeRecord>,
}

impl TradeTable {
    pub fn new(records: Vec<TradeRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy of the table without rows whose numeric columns are all zero.
    pub fn without_blank_rows(&self) -> TradeTable {
        TradeTable::new(
            self.records
                .iter()
                .filter(|record| !record.is_blank())
                .cloned()
                .collect(),
        )
    }

    /// Number of distinct HS codes, used for the status line.
    pub fn distinct_codes(&self) -> usize {
        let mut codes: Vec<HsCode> = self.records.iter().map(|r| r.hs_code).collect();
        codes.sort_unstable();
        codes.dedup();
        codes.len()
    }
}

impl FromIterator<TradeRecord> for TradeTable {
    fn from_iter<I: IntoIterator<Item = TradeRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A single month of freight costs; one value per cost column.
#[derive(Clone, Debug, PartialEq)]
pub struct FreightRow {
    pub period: String,
    pub values: Vec<Option<f64>>,
}

/// Period-keyed freight cost table (e.g. sea export rates per route).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FreightSeries {
    pub columns: Vec<String>,
    pub rows: Vec<FreightRow>,
}

/// Locations of the CSV files the app reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSources {
    pub trade_table: PathBuf,
    pub sea_export: PathBuf,
    pub sea_import: PathBuf,
    pub air: PathBuf,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            trade_table: PathBuf::from("incomeoutcome2.csv"),
            sea_export: PathBuf::from("outcost_ship.csv"),
            sea_import: PathBuf::from("incost_ship.csv"),
            air: PathBuf::from("cost_air.csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: HsCode, country: &str, numbers: [f64; 5]) -> TradeRecord {
        TradeRecord {
            hs_code: code,
            country: country.to_string(),
            export_weight: numbers[0],
            export_value: numbers[1],
            import_weight: numbers[2],
            import_value: numbers[3],
            trade_balance: numbers[4],
            item_name: None,
        }
    }

    #[test]
    fn blank_rows_are_dropped() {
        let table: TradeTable = vec![
            record(3, "A", [0.0; 5]),
            record(3, "B", [0.0, 0.0, 0.0, 0.0, -1.0]),
            record(4, "C", [1.0, 0.0, 0.0, 0.0, 0.0]),
        ]
        .into_iter()
        .collect();

        let cleaned = table.without_blank_rows();
        let countries: Vec<_> = cleaned.records().iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, vec!["B", "C"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn distinct_codes_ignores_duplicates() {
        let table: TradeTable = vec![
            record(3, "A", [1.0; 5]),
            record(3, "B", [1.0; 5]),
            record(7, "C", [1.0; 5]),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.distinct_codes(), 2);
        assert_eq!(TradeTable::default().distinct_codes(), 0);
    }
}
