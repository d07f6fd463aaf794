pub mod config;
pub mod error;
pub mod exporter;
pub mod service;

pub use config::{Config, Overrides, Settings, resolve_config_path};
pub use error::{Error, Result};
pub use exporter::{ExportTarget, OutputFormat, default_sheet_name, write_table};
pub use service::{ExportRequest, ExportService};
