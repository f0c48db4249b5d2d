// Export modules for library usage
pub mod classification;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod io;
pub mod metrics;
pub mod observability;
pub mod report;

// Re-export commonly used types
pub use crate::core::{
    Band, BandResult, ClassifiedEntity, DerivedMetrics, EntityRecord, Error, MeasuredEntity,
    Result,
};

pub use crate::metrics::{compute_entity_metrics, compute_metrics, compute_metrics_parallel};

pub use crate::classification::{
    classify, classify_all, classify_value, CutPoints, ThresholdPolicy, EMPLOYEE_CUTS,
};

pub use crate::report::{build_report, Report, ReportRow, ReportSummary, REPORT_COLUMNS};

pub use crate::io::output::{create_writer, OutputFormat, ReportWriter};
