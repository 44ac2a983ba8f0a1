pub mod bar_chart;
pub mod kpi_card;
pub mod line_chart;
pub mod ranked_table;
pub mod toast;

pub use bar_chart::BarChart;
pub use kpi_card::KpiCard;
pub use line_chart::LineChart;
pub use ranked_table::RankedTable;
