pub mod loader;

pub use loader::{
    export_cleaned_table, load_freight_series, load_trade_table, LoadError,
    Loaded,
};
