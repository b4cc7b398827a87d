pub mod filter;
pub mod loader;
pub mod models;
pub mod reports;

pub use filter::{apply, FilterSelection, FilteredData, Selector};
pub use loader::{DataContext, LoadError};
pub use reports::{build_reports, GeoScope, ReportBundle, ReportData};
