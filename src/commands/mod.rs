pub mod error;
pub mod init;
pub mod report;
pub mod sample;

pub use error::render_error;
pub use init::{init_config, init_config_at};
pub use report::{handle_report, ReportConfig};
pub use sample::{sample_records, write_sample};
