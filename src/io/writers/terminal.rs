use crate::core::Band;
use crate::io::output::ReportWriter;
use crate::io::writers::chart::{carbon_chart, employee_chart, BarChart};
use crate::report::{BandCounts, Report, ReportRow, REPORT_COLUMNS};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::io::Write;

const CHART_WIDTH: usize = 40;

/// Column indexes that carry a band color.
const CARBON_COLUMN: usize = 10;
const EMPLOYEE_COLUMN: usize = 11;

pub struct TerminalWriter<W: Write> {
    writer: W,
    use_color: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, use_color: bool) -> Self {
        Self { writer, use_color }
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        self.write_header(report)?;
        writeln!(self.writer, "{}", build_table(&report.rows, self.use_color))?;
        writeln!(self.writer)?;
        self.write_summary(report)?;
        self.write_chart(&carbon_chart(report))?;
        self.write_chart(&employee_chart(report))?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn paint(&self, text: &str, band: Band) -> String {
        if !self.use_color {
            return text.to_string();
        }
        match band {
            Band::Green => text.green().to_string(),
            Band::Yellow => text.yellow().to_string(),
            Band::Red => text.red().to_string(),
        }
    }

    fn emphasize(&self, text: &str) -> String {
        if self.use_color {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn write_header(&mut self, report: &Report) -> anyhow::Result<()> {
        let rule = self.emphasize("═══════════════════════════════════════════");
        let title = self.emphasize("           ESG INTENSITY REPORT");
        writeln!(self.writer)?;
        writeln!(self.writer, "{rule}")?;
        writeln!(self.writer, "{title}")?;
        writeln!(self.writer, "{rule}")?;
        writeln!(
            self.writer,
            "Generated: {}   Policy: {}",
            report.summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.summary.policy
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &Report) -> anyhow::Result<()> {
        let summary = &report.summary;
        writeln!(
            self.writer,
            "Entities: {} ({} reporting scope 3)",
            summary.entity_count, summary.scope3_reported_count
        )?;
        let carbon = self.counts_line(&summary.carbon_bands);
        let employee = self.counts_line(&summary.employee_bands);
        writeln!(self.writer, "  Carbon intensity:   {carbon}")?;
        writeln!(self.writer, "  Employee intensity: {employee}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn counts_line(&self, counts: &BandCounts) -> String {
        Band::ALL
            .iter()
            .map(|band| self.paint(&format!("{} {}", counts.get(*band), band), *band))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn write_chart(&mut self, chart: &BarChart) -> anyhow::Result<()> {
        let title = self.emphasize(chart.title);
        writeln!(self.writer, "{title}")?;
        writeln!(self.writer, "───────────────────────────────────────────")?;
        for (line, bar) in chart.text_lines(CHART_WIDTH).iter().zip(&chart.bars) {
            let line = self.paint(line, bar.band);
            writeln!(self.writer, "{line}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

/// Build the data table: bold header, numeric columns right-aligned, the
/// two classified intensity cells filled with their band color.
pub fn build_table(rows: &[ReportRow], use_color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(
            REPORT_COLUMNS
                .iter()
                .map(|name| Cell::new(name).add_attribute(Attribute::Bold)),
        );

    if use_color {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }

    for row in rows {
        let cells = row.cells().into_iter().enumerate().map(|(index, text)| {
            let cell = Cell::new(text);
            let cell = if (2..=EMPLOYEE_COLUMN).contains(&index) {
                cell.set_alignment(CellAlignment::Right)
            } else {
                cell
            };
            match band_for_column(row, index) {
                Some(band) if use_color => {
                    let (r, g, b) = band.fill_rgb();
                    cell.bg(Color::Rgb { r, g, b }).fg(Color::Black)
                }
                _ => cell,
            }
        });
        table.add_row(cells);
    }

    table
}

fn band_for_column(row: &ReportRow, index: usize) -> Option<Band> {
    match index {
        CARBON_COLUMN => Some(row.carbon_band),
        EMPLOYEE_COLUMN => Some(row.employee_band),
        _ => None,
    }
}
