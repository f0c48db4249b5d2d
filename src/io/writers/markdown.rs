use crate::core::Band;
use crate::io::output::ReportWriter;
use crate::io::writers::chart::{carbon_chart, employee_chart, BarChart};
use crate::report::{BandCounts, Report, REPORT_COLUMNS};
use std::io::Write;

const CHART_WIDTH: usize = 40;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_summary(report)?;
        self.write_data_table(report)?;
        self.write_chart(&carbon_chart(report))?;
        self.write_chart(&employee_chart(report))?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.writer, "# ESG Intensity Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Threshold policy: {}", report.summary.policy)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &Report) -> anyhow::Result<()> {
        let summary = &report.summary;
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Green | Yellow | Red |")?;
        writeln!(self.writer, "|--------|-------|--------|-----|")?;
        self.write_counts_row("Carbon_Intensity_All", &summary.carbon_bands)?;
        self.write_counts_row("Employee_Intensity", &summary.employee_bands)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Entities: {} ({} reporting scope 3)",
            summary.entity_count, summary.scope3_reported_count
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_counts_row(&mut self, metric: &str, counts: &BandCounts) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "| {} | {} | {} | {} |",
            metric,
            counts.get(Band::Green),
            counts.get(Band::Yellow),
            counts.get(Band::Red)
        )?;
        Ok(())
    }

    fn write_data_table(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.writer, "## Data")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| {} |", REPORT_COLUMNS.join(" | "))?;
        writeln!(
            self.writer,
            "|{}",
            REPORT_COLUMNS.iter().map(|_| "---|").collect::<String>()
        )?;
        for row in &report.rows {
            let cells: Vec<String> = row.cells().iter().map(|c| escape_cell(c)).collect();
            writeln!(self.writer, "| {} |", cells.join(" | "))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_chart(&mut self, chart: &BarChart) -> anyhow::Result<()> {
        writeln!(self.writer, "## {}", chart.title)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "```text")?;
        for line in chart.text_lines(CHART_WIDTH) {
            writeln!(self.writer, "{line}")?;
        }
        writeln!(self.writer, "```")?;
        writeln!(self.writer)?;
        Ok(())
    }
}

// Table rows must stay on one line.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}
