pub mod input;
pub mod output;
pub mod writers;

pub use input::{parse_entities, read_entities, InputFormat, InputRow};
pub use output::{create_writer, OutputFormat, ReportWriter};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}
