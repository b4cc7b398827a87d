pub mod bars;
pub mod filter_form;
pub mod header;
pub mod help_modal;
pub mod payment_chart;
pub mod placeholder;
pub mod side_panel;
pub mod state_chart;
pub mod status_bar;
pub mod top_products_chart;
pub mod trend_chart;

pub use filter_form::FilterForm;
pub use header::Header;
pub use help_modal::HelpModal;
pub use payment_chart::PaymentChart;
pub use side_panel::SidePanel;
pub use state_chart::StateChart;
pub use status_bar::StatusBar;
pub use top_products_chart::TopProductsChart;
pub use trend_chart::TrendChart;
