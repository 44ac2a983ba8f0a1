use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

use serde::{Deserialize, Serialize};

use super::entities::{DataSources, FreightSeries, TradeTable};
use super::freight::{FreightChart, FreightMode, DEFAULT_END_PERIOD, DEFAULT_START_PERIOD};

/// Whether ranking results are shown as tables or bar charts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultView {
    #[default]
    Table,
    Graph,
}

/// Outcome of the last attempt to read a data file.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    NotLoaded,
    Loaded {
        data: Arc<T>,
        loaded_at: SystemTime,
        skipped_rows: usize,
    },
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::NotLoaded
    }
}

impl<T> LoadState<T> {
    pub fn data(&self) -> Option<Arc<T>> {
        match self {
            LoadState::Loaded { data, .. } => Some(Arc::clone(data)),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn age(&self) -> Option<Duration> {
        match self {
            LoadState::Loaded { loaded_at, .. } => loaded_at.elapsed().ok(),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FreightRange {
    pub start: String,
    pub end: String,
}

impl Default for FreightRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_PERIOD.to_string(),
            end: DEFAULT_END_PERIOD.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub sources: DataSources,
    pub trade: LoadState<TradeTable>,
    pub freight: HashMap<FreightChart, LoadState<FreightSeries>>,
    /// Raw text of the HS code field; parsed on every render.
    pub hs_code_input: String,
    pub result_view: ResultView,
    pub freight_mode: FreightMode,
    pub freight_range: FreightRange,
}

impl AppState {
    pub fn trade_table(&self) -> Option<Arc<TradeTable>> {
        self.trade.data()
    }

    pub fn freight_state(&self, chart: FreightChart) -> LoadState<FreightSeries> {
        self.freight.get(&chart).cloned().unwrap_or_default()
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.sources = persisted.sources;
        self.hs_code_input = persisted.last_hs_code;
        self.result_view = persisted.result_view;
        self.freight_range = FreightRange {
            start: persisted.freight_start,
            end: persisted.freight_end,
        };
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            sources: self.sources.clone(),
            last_hs_code: self.hs_code_input.clone(),
            result_view: self.result_view,
            freight_start: self.freight_range.start.clone(),
            freight_end: self.freight_range.end.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub sources: DataSources,
    #[serde(default)]
    pub last_hs_code: String,
    #[serde(default)]
    pub result_view: ResultView,
    #[serde(default = "default_start")]
    pub freight_start: String,
    #[serde(default = "default_end")]
    pub freight_end: String,
}

impl Default for PersistedState {
    fn default() -> Self {
        AppState::default().to_persisted()
    }
}

fn default_start() -> String {
    DEFAULT_START_PERIOD.to_string()
}

fn default_end() -> String {
    DEFAULT_END_PERIOD.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_roundtrip_keeps_user_choices() {
        let mut state = AppState::default();
        state.hs_code_input = "0303".to_string();
        state.result_view = ResultView::Graph;
        state.freight_range.start = "2020-03".to_string();

        let json = serde_json::to_string(&state.to_persisted()).unwrap();
        let mut restored = AppState::default();
        restored.apply_persisted(serde_json::from_str(&json).unwrap());

        assert_eq!(restored.hs_code_input, "0303");
        assert_eq!(restored.result_view, ResultView::Graph);
        assert_eq!(restored.freight_range.start, "2020-03");
        assert_eq!(restored.freight_range.end, DEFAULT_END_PERIOD);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let persisted: PersistedState = serde_json::from_str("{}").unwrap();
        assert_eq!(persisted.sources, DataSources::default());
        assert_eq!(persisted.freight_start, DEFAULT_START_PERIOD);
        assert_eq!(persisted.result_view, ResultView::Table);
    }

    #[test]
    fn unloaded_freight_defaults_to_not_loaded() {
        let state = AppState::default();
        assert_eq!(state.freight_state(FreightChart::Air), LoadState::NotLoaded);
        assert!(state.trade_table().is_none());
    }
}
