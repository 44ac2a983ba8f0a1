//! CSV loading for the trade table and freight cost series.
//!
//! - Accepts the Korean headers of the customs export as well as English names.
//! - Rows without a usable HS code are skipped and counted, never fatal.
//! - Numeric cells that are empty or unparsable read as `0.0` for trade rows
//!   and as gaps for freight rows.

use std::{
    fs::File,
    io::{self, BufReader, Read, Write},
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{FreightRow, FreightSeries, HsCode, TradeRecord, TradeTable};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Header row written by [`write_trade_table`], matching the source export.
const TRADE_HEADERS: [&str; 8] = [
    "HS코드",
    "국가",
    "수출 중량",
    "수출 금액",
    "수입 중량",
    "수입 금액",
    "무역수지",
    "품목명",
];

/// Columns the ranking reads, by Korean name and English alias.
const REQUIRED_TRADE_COLUMNS: [(&str, [&str; 2]); 6] = [
    ("HS코드", ["HS코드", "hs_code"]),
    ("국가", ["국가", "country"]),
    ("수출 중량", ["수출 중량", "export_weight"]),
    ("수출 금액", ["수출 금액", "export_value"]),
    ("수입 중량", ["수입 중량", "import_weight"]),
    ("수입 금액", ["수입 금액", "import_value"]),
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("freight file has no cost columns")]
    NoCostColumns,
}

#[derive(Clone, Debug)]
pub struct Loaded<T> {
    pub data: T,
    pub skipped_rows: usize,
}

#[derive(Debug, Deserialize)]
struct RawTradeRow {
    #[serde(rename = "HS코드", alias = "hs_code", default)]
    hs_code: Option<String>,
    #[serde(rename = "국가", alias = "country", default)]
    country: Option<String>,
    #[serde(rename = "수출 중량", alias = "export_weight", default)]
    export_weight: Option<String>,
    #[serde(rename = "수출 금액", alias = "export_value", default)]
    export_value: Option<String>,
    #[serde(rename = "수입 중량", alias = "import_weight", default)]
    import_weight: Option<String>,
    #[serde(rename = "수입 금액", alias = "import_value", default)]
    import_value: Option<String>,
    #[serde(rename = "무역수지", alias = "trade_balance", default)]
    trade_balance: Option<String>,
    #[serde(rename = "품목명", alias = "item_name", default)]
    item_name: Option<String>,
}

impl RawTradeRow {
    fn into_record(self) -> Option<TradeRecord> {
        let hs_code = parse_code(self.hs_code.as_deref()?)?;
        Some(TradeRecord {
            hs_code,
            country: self.country.map(|c| c.trim().to_string()).unwrap_or_default(),
            export_weight: parse_number(self.export_weight.as_deref()).unwrap_or(0.0),
            export_value: parse_number(self.export_value.as_deref()).unwrap_or(0.0),
            import_weight: parse_number(self.import_weight.as_deref()).unwrap_or(0.0),
            import_value: parse_number(self.import_value.as_deref()).unwrap_or(0.0),
            trade_balance: parse_number(self.trade_balance.as_deref()).unwrap_or(0.0),
            item_name: self
                .item_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        })
    }
}

/// Integer codes, also tolerating float-formatted ones such as `3.0`.
fn parse_code(raw: &str) -> Option<HsCode> {
    let trimmed = raw.trim();
    if let Ok(code) = trimmed.parse::<HsCode>() {
        return Some(code);
    }
    let float = trimmed.parse::<f64>().ok()?;
    (float.is_finite() && float.fract() == 0.0 && float.abs() < i64::MAX as f64)
        .then_some(float as HsCode)
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    let cleaned: String = raw?.trim().chars().filter(|ch| *ch != ',').collect();
    cleaned.parse::<f64>().ok().filter(|value| !value.is_nan())
}

fn normalized_headers<R: Read>(reader: &mut csv::Reader<R>) -> Result<csv::StringRecord, LoadError> {
    let headers = reader.headers()?;
    Ok(headers
        .iter()
        .map(|name| name.trim_start_matches('\u{feff}').trim())
        .collect())
}

fn has_column(headers: &csv::StringRecord, names: &[&str]) -> bool {
    headers.iter().any(|header| names.contains(&header))
}

pub fn read_trade_table<R: Read>(input: R) -> Result<Loaded<TradeTable>, LoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers = normalized_headers(&mut reader)?;
    for (column, aliases) in REQUIRED_TRADE_COLUMNS {
        if !has_column(&headers, &aliases) {
            return Err(LoadError::MissingColumn(column));
        }
    }
    reader.set_headers(headers);

    let mut records = Vec::new();
    let mut skipped_rows = 0;
    for (line, row) in reader.deserialize::<RawTradeRow>().enumerate() {
        match row?.into_record() {
            Some(record) => records.push(record),
            None => {
                debug!(line = line + 2, "skipping trade row without a numeric HS code");
                skipped_rows += 1;
            }
        }
    }

    Ok(Loaded {
        data: TradeTable::new(records),
        skipped_rows,
    })
}

pub fn read_freight_series<R: Read>(input: R) -> Result<Loaded<FreightSeries>, LoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers = normalized_headers(&mut reader)?;
    if headers.is_empty() {
        return Err(LoadError::MissingColumn("기간"));
    }
    let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
    if columns.is_empty() {
        return Err(LoadError::NoCostColumns);
    }

    let mut rows = Vec::new();
    let mut skipped_rows = 0;
    for record in reader.records() {
        let record = record?;
        let period = record.get(0).map(str::trim).unwrap_or_default();
        if period.is_empty() {
            skipped_rows += 1;
            continue;
        }
        let values = (1..=columns.len())
            .map(|idx| parse_number(record.get(idx)))
            .collect();
        rows.push(FreightRow {
            period: period.to_string(),
            values,
        });
    }

    Ok(Loaded {
        data: FreightSeries { columns, rows },
        skipped_rows,
    })
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })
}

pub fn load_trade_table(path: &Path) -> Result<Loaded<TradeTable>, LoadError> {
    let loaded = read_trade_table(open(path)?)?;
    info!(
        path = %path.display(),
        rows = loaded.data.len(),
        codes = loaded.data.distinct_codes(),
        skipped = loaded.skipped_rows,
        "loaded trade table"
    );
    if loaded.data.is_empty() {
        warn!(path = %path.display(), "trade table has no usable rows");
    }
    if loaded.skipped_rows > 0 {
        warn!(
            path = %path.display(),
            skipped = loaded.skipped_rows,
            "some trade rows had no usable HS code"
        );
    }
    Ok(loaded)
}

pub fn load_freight_series(path: &Path) -> Result<Loaded<FreightSeries>, LoadError> {
    let loaded = read_freight_series(open(path)?)?;
    info!(
        path = %path.display(),
        periods = loaded.data.rows.len(),
        columns = loaded.data.columns.len(),
        "loaded freight series"
    );
    Ok(loaded)
}

/// Writes `table` with the Korean customs headers, prefixed by a UTF-8 BOM so
/// spreadsheet tools pick up the Korean column names.
pub fn write_trade_table<W: Write>(mut output: W, table: &TradeTable) -> Result<(), LoadError> {
    output.write_all(UTF8_BOM).map_err(csv::Error::from)?;
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(TRADE_HEADERS)?;
    for record in table.records() {
        writer.write_record([
            record.hs_code.to_string(),
            record.country.clone(),
            record.export_weight.to_string(),
            record.export_value.to_string(),
            record.import_weight.to_string(),
            record.import_value.to_string(),
            record.trade_balance.to_string(),
            record.item_name.clone().unwrap_or_default(),
        ])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn save_trade_table(path: &Path, table: &TradeTable) -> Result<(), LoadError> {
    let file = File::create(path).map_err(|source| LoadError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    write_trade_table(file, table)?;
    info!(path = %path.display(), rows = table.len(), "wrote trade table");
    Ok(())
}

/// File name used for the cleaned export.
pub const CLEANED_FILE_NAME: &str = "incomeoutcome_cleaned.csv";

/// Drops all-zero rows and writes the rest into `dir`, returning the written
/// path and row count.
pub fn export_cleaned_table(dir: &Path, table: &TradeTable) -> Result<(PathBuf, usize), LoadError> {
    std::fs::create_dir_all(dir).map_err(|source| LoadError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let cleaned = table.without_blank_rows();
    let dropped = table.len() - cleaned.len();
    let path = dir.join(CLEANED_FILE_NAME);
    save_trade_table(&path, &cleaned)?;
    if dropped > 0 {
        debug!(dropped, "removed rows without any trade figures");
    }
    Ok((path, cleaned.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KOREAN_CSV: &str = "\u{feff}HS코드,국가,수출 중량,수출 금액,수입 중량,수입 금액,무역수지,품목명\n\
        3,A,10,2,0,0,2,어류\n\
        3,B,5,1,4,2,-1,어류\n\
        ,C,1,1,1,1,0,\n\
        총계,D,1,1,1,1,0,\n\
        4,E,\"1,000\",x,1,1,0,\n";

    #[test]
    fn reads_korean_headers_and_skips_bad_codes() {
        let loaded = read_trade_table(KOREAN_CSV.as_bytes()).unwrap();
        assert_eq!(loaded.data.len(), 3);
        assert_eq!(loaded.skipped_rows, 2);

        let b = &loaded.data.records()[1];
        assert_eq!(b.hs_code, 3);
        assert_eq!(b.country, "B");
        assert_eq!(b.import_value, 2.0);
        assert_eq!(b.item_name.as_deref(), Some("어류"));

        let e = &loaded.data.records()[2];
        assert_eq!(e.export_weight, 1000.0);
        assert_eq!(e.export_value, 0.0);
        assert_eq!(e.item_name, None);
    }

    #[test]
    fn reads_english_headers() {
        let csv = "hs_code,country,export_weight,export_value,import_weight,import_value\n\
            3.0,Chile,5,1,4,2\n";
        let loaded = read_trade_table(csv.as_bytes()).unwrap();
        let record = &loaded.data.records()[0];
        assert_eq!(record.hs_code, 3);
        assert_eq!(record.trade_balance, 0.0);
    }

    #[test]
    fn missing_code_column_is_an_error() {
        let err = read_trade_table("country,x\nA,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("HS코드")));
    }

    #[test]
    fn missing_weight_column_is_an_error() {
        let csv = "HS코드,국가,수출 금액,수입 금액\n3,A,1,2\n3,B,5,6\n";
        let err = read_trade_table(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("수출 중량")));

        let csv = "hs_code,country,export_weight,export_value,import_value\n3,A,1,1,1\n";
        let err = read_trade_table(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("수입 중량")));
    }

    #[test]
    fn freight_rows_keep_gaps() {
        let csv = "기간,부산-LA,부산-로테르담\n2019-01,100,\n2019-02,110,n/a\n,1,1\n";
        let loaded = read_freight_series(csv.as_bytes()).unwrap();
        assert_eq!(loaded.data.columns, vec!["부산-LA", "부산-로테르담"]);
        assert_eq!(loaded.data.rows.len(), 2);
        assert_eq!(loaded.skipped_rows, 1);
        assert_eq!(loaded.data.rows[1].values, vec![Some(110.0), None]);
    }

    #[test]
    fn freight_without_cost_columns_is_rejected() {
        let err = read_freight_series("기간\n2019-01\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::NoCostColumns));
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("definitely/not/here.csv");
        let err = load_trade_table(path).unwrap_err();
        assert!(err.to_string().contains("here.csv"));
    }

    #[test]
    fn written_table_reads_back() {
        let source = read_trade_table(KOREAN_CSV.as_bytes()).unwrap().data;
        let mut buffer = Vec::new();
        write_trade_table(&mut buffer, &source).unwrap();
        assert!(buffer.starts_with(UTF8_BOM));

        let reread = read_trade_table(buffer.as_slice()).unwrap();
        assert_eq!(reread.data, source);
        assert_eq!(reread.skipped_rows, 0);
    }

    #[test]
    fn cleaned_export_drops_blank_rows() {
        let csv = "HS코드,국가,수출 중량,수출 금액,수입 중량,수입 금액,무역수지\n\
            3,A,1,1,1,1,0\n\
            3,B,0,0,0,0,0\n";
        let table = read_trade_table(csv.as_bytes()).unwrap().data;
        let dir = std::env::temp_dir().join(format!("trade-export-{}", std::process::id()));

        let (path, rows) = export_cleaned_table(&dir, &table).unwrap();
        assert_eq!(rows, 1);
        let written = load_trade_table(&path).unwrap().data;
        assert_eq!(written.records()[0].country, "A");

        std::fs::remove_dir_all(&dir).ok();
    }
}
