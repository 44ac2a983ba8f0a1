//! Trade ranking and freight-series logic lives here.

pub mod app_state;
pub mod entities;
pub mod format;
pub mod freight;
pub mod ranking;

pub use app_state::{AppState, FreightRange, LoadState, PersistedState, ResultView};
pub use entities::{DataSources, FreightRow, FreightSeries, HsCode, TradeRecord, TradeTable};
pub use format::{rank_report, view_rows, RankedRowText};
pub use freight::{parse_range, FreightChart, FreightMode, PeriodError};
pub use ranking::{item_label, parse_hs_code, rank_by_code, HsCodeInput, RankedView, TradeFlow};
