use crate::io::output::ReportWriter;
use crate::report::{Report, ReportRow, ReportSummary, REPORT_COLUMNS};
use serde::Serialize;
use std::io::Write;

/// JSON document layout: summary, column order, then rows.
#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a ReportSummary,
    columns: &'a [&'static str],
    rows: &'a [ReportRow],
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        let document = JsonReport {
            summary: &report.summary,
            columns: &REPORT_COLUMNS,
            rows: &report.rows,
        };
        let json = serde_json::to_string_pretty(&document)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}
