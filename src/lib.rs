pub mod chart;
pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod size;
pub mod timing;

pub use config::{ReportConfig, ReportInputs};
pub use error::{ReportError, Result};
pub use report::{generate_report, Report};
