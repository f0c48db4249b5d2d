use crate::io::output::ReportWriter;
use crate::io::writers::chart::{carbon_chart, employee_chart, BarChart};
use crate::report::{Report, ReportRow, REPORT_COLUMNS};
use html_escape::encode_text;
use std::io::Write;

const CHART_BAR_HEIGHT: usize = 24;
const CHART_BAR_GAP: usize = 8;
const CHART_LABEL_WIDTH: usize = 160;
const CHART_PLOT_WIDTH: usize = 480;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2rem; }
table { border-collapse: collapse; margin-bottom: 2rem; }
th, td { border: 1px solid #d0d0d0; padding: 4px 8px; }
th { font-weight: bold; background: #f3f3f3; position: sticky; top: 0; }
td.num { text-align: right; }
.charts { display: flex; flex-wrap: wrap; gap: 2rem; }
"#;

pub struct HtmlWriter<W: Write> {
    writer: W,
}

impl<W: Write> HtmlWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for HtmlWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.writer, "<!DOCTYPE html>")?;
        writeln!(self.writer, "<html lang=\"en\">")?;
        writeln!(self.writer, "<head>")?;
        writeln!(self.writer, "<meta charset=\"utf-8\">")?;
        writeln!(self.writer, "<title>ESG Intensity Report</title>")?;
        writeln!(self.writer, "<style>{STYLE}</style>")?;
        writeln!(self.writer, "</head>")?;
        writeln!(self.writer, "<body>")?;
        writeln!(self.writer, "<h1>ESG Intensity Report</h1>")?;
        writeln!(
            self.writer,
            "<p>Generated {} &middot; policy <code>{}</code></p>",
            report.summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            encode_text(&report.summary.policy)
        )?;
        self.write_table(&report.rows)?;
        writeln!(self.writer, "<div class=\"charts\">")?;
        self.write_chart(&carbon_chart(report))?;
        self.write_chart(&employee_chart(report))?;
        writeln!(self.writer, "</div>")?;
        writeln!(self.writer, "</body>")?;
        writeln!(self.writer, "</html>")?;
        Ok(())
    }
}

impl<W: Write> HtmlWriter<W> {
    fn write_table(&mut self, rows: &[ReportRow]) -> anyhow::Result<()> {
        writeln!(self.writer, "<table>")?;
        write!(self.writer, "<thead><tr>")?;
        for column in REPORT_COLUMNS {
            write!(self.writer, "<th>{column}</th>")?;
        }
        writeln!(self.writer, "</tr></thead>")?;
        writeln!(self.writer, "<tbody>")?;
        for row in rows {
            write!(self.writer, "<tr>")?;
            for (index, text) in row.cells().iter().enumerate() {
                let fill = match REPORT_COLUMNS[index] {
                    "Carbon_Intensity_All" => Some(row.carbon_band.fill_hex()),
                    "Employee_Intensity" => Some(row.employee_band.fill_hex()),
                    _ => None,
                };
                let class = if (2..=11).contains(&index) { " class=\"num\"" } else { "" };
                match fill {
                    Some(hex) => write!(
                        self.writer,
                        "<td{class} style=\"background:#{hex}\">{}</td>",
                        encode_text(text)
                    )?,
                    None => write!(self.writer, "<td{class}>{}</td>", encode_text(text))?,
                }
            }
            writeln!(self.writer, "</tr>")?;
        }
        writeln!(self.writer, "</tbody>")?;
        writeln!(self.writer, "</table>")?;
        Ok(())
    }

    fn write_chart(&mut self, chart: &BarChart) -> anyhow::Result<()> {
        let height = chart.bars.len() * (CHART_BAR_HEIGHT + CHART_BAR_GAP) + CHART_BAR_GAP;
        let width = CHART_LABEL_WIDTH + CHART_PLOT_WIDTH + 80;

        writeln!(self.writer, "<figure>")?;
        writeln!(
            self.writer,
            "<figcaption>{}</figcaption>",
            encode_text(chart.title)
        )?;
        writeln!(
            self.writer,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" role=\"img\" data-series=\"{}\">",
            chart.series
        )?;
        for (index, bar) in chart.bars.iter().enumerate() {
            let y = CHART_BAR_GAP + index * (CHART_BAR_HEIGHT + CHART_BAR_GAP);
            let length = chart.scaled_length(bar.value, CHART_PLOT_WIDTH);
            let text_y = y + CHART_BAR_HEIGHT * 2 / 3;
            writeln!(
                self.writer,
                "<text x=\"{}\" y=\"{text_y}\" text-anchor=\"end\">{}</text>",
                CHART_LABEL_WIDTH - 8,
                encode_text(&bar.label)
            )?;
            writeln!(
                self.writer,
                "<rect x=\"{CHART_LABEL_WIDTH}\" y=\"{y}\" width=\"{length}\" height=\"{CHART_BAR_HEIGHT}\" fill=\"#{}\" stroke=\"#808080\"/>",
                bar.band.fill_hex()
            )?;
            writeln!(
                self.writer,
                "<text x=\"{}\" y=\"{text_y}\">{:.2}</text>",
                CHART_LABEL_WIDTH + length + 6,
                bar.value
            )?;
        }
        writeln!(self.writer, "</svg>")?;
        writeln!(self.writer, "</figure>")?;
        Ok(())
    }
}
