pub mod freight;
pub mod ranking;
pub mod settings;

pub use freight::FreightPage;
pub use ranking::RankingPage;
pub use settings::SettingsPage;
