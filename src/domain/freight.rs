//! Freight cost time series: month range filtering and chart modes.

use std::fmt;

use thiserror::Error;
use time::{macros::format_description, Date};

use super::entities::{FreightRow, FreightSeries};

pub const DEFAULT_START_PERIOD: &str = "2019-01";
pub const DEFAULT_END_PERIOD: &str = "2024-06";

/// A zero-padded `YYYY-MM` month key; ordering matches string ordering.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Period(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("period must look like YYYY-MM, got '{0}'")]
    Format(String),
    #[error("start period {start} is after end period {end}")]
    Reversed { start: String, end: String },
}

impl Period {
    pub fn parse(input: &str) -> Result<Self, PeriodError> {
        let trimmed = input.trim();
        let fmt = format_description!("[year]-[month]-[day]");
        if trimmed.len() != 7 {
            return Err(PeriodError::Format(trimmed.to_string()));
        }
        Date::parse(&format!("{trimmed}-01"), &fmt)
            .map_err(|_| PeriodError::Format(trimmed.to_string()))?;
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates both ends of an inclusive range.
pub fn parse_range(start: &str, end: &str) -> Result<(Period, Period), PeriodError> {
    let start = Period::parse(start)?;
    let end = Period::parse(end)?;
    if start > end {
        return Err(PeriodError::Reversed {
            start: start.0,
            end: end.0,
        });
    }
    Ok((start, end))
}

impl FreightSeries {
    /// Rows with `start <= period <= end`, compared as strings.
    pub fn within(&self, start: &str, end: &str) -> FreightSeries {
        FreightSeries {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| start <= row.period.as_str() && row.period.as_str() <= end)
                .cloned()
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Values of one column in row order, gaps preserved.
    pub fn column(&self, index: usize) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|row: &FreightRow| row.values.get(index).copied().flatten())
            .collect()
    }

    pub fn periods(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.period.as_str()).collect()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FreightMode {
    #[default]
    Sea,
    Air,
}

/// Which file a chart reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FreightChart {
    SeaExport,
    SeaImport,
    Air,
}

impl FreightMode {
    pub fn label(&self) -> &'static str {
        match self {
            FreightMode::Sea => "Sea freight",
            FreightMode::Air => "Air freight",
        }
    }

    pub fn charts(&self) -> &'static [FreightChart] {
        match self {
            FreightMode::Sea => &[FreightChart::SeaExport, FreightChart::SeaImport],
            FreightMode::Air => &[FreightChart::Air],
        }
    }
}

impl FreightChart {
    pub fn title(&self) -> &'static str {
        match self {
            FreightChart::SeaExport => "Sea export freight cost",
            FreightChart::SeaImport => "Sea import freight cost",
            FreightChart::Air => "Air freight cost",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            FreightChart::SeaExport | FreightChart::SeaImport => "Cost (KRW thousand / 2TEU)",
            FreightChart::Air => "Cost (KRW / kg)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> FreightSeries {
        let rows = ["2018-12", "2019-01", "2020-06", "2024-06", "2024-07"]
            .iter()
            .enumerate()
            .map(|(idx, period)| FreightRow {
                period: period.to_string(),
                values: vec![Some(idx as f64), None],
            })
            .collect();
        FreightSeries {
            columns: vec!["Busan-LA".to_string(), "Busan-Rotterdam".to_string()],
            rows,
        }
    }

    #[test]
    fn range_filter_is_inclusive() {
        let filtered = series().within(DEFAULT_START_PERIOD, DEFAULT_END_PERIOD);
        assert_eq!(filtered.periods(), vec!["2019-01", "2020-06", "2024-06"]);
        assert_eq!(filtered.columns.len(), 2);
    }

    #[test]
    fn reversed_range_yields_nothing() {
        assert!(series().within("2024-06", "2019-01").is_empty());
    }

    #[test]
    fn column_keeps_gaps() {
        let data = series();
        assert_eq!(data.column(0)[2], Some(2.0));
        assert_eq!(data.column(1), vec![None; 5]);
        assert_eq!(data.column(7), vec![None; 5]);
    }

    #[test]
    fn period_parse_validates_month() {
        assert_eq!(Period::parse("2019-01").map(|p| p.to_string()), Ok("2019-01".to_string()));
        assert!(Period::parse("2019-13").is_err());
        assert!(Period::parse("2019-1").is_err());
        assert!(Period::parse("201901").is_err());
        assert!(Period::parse("").is_err());
    }

    #[test]
    fn range_rejects_reversed_bounds() {
        assert!(parse_range("2019-01", "2024-06").is_ok());
        assert_eq!(
            parse_range("2024-06", "2019-01"),
            Err(PeriodError::Reversed {
                start: "2024-06".to_string(),
                end: "2019-01".to_string()
            })
        );
    }

    #[test]
    fn modes_map_to_charts() {
        assert_eq!(FreightMode::Sea.charts().len(), 2);
        assert_eq!(FreightMode::Air.charts(), &[FreightChart::Air]);
    }
}
