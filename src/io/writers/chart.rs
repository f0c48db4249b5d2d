//! Bar chart data shared by the writers.
//!
//! Each report carries two charts keyed by company name: carbon intensity
//! (all scopes) and employee intensity. Writers only decide how to draw
//! them.

use crate::core::Band;
use crate::report::Report;

pub const CARBON_CHART_TITLE: &str = "Carbon Intensity (tCO2e / revenue, all scopes)";
pub const EMPLOYEE_CHART_TITLE: &str = "Employee Intensity (employees / revenue)";

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub band: Band,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: &'static str,
    pub series: &'static str,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|b| b.value).fold(0.0, f64::max)
    }

    /// Bar length in `0..=width` cells, proportional to the largest bar.
    pub fn scaled_length(&self, value: f64, width: usize) -> usize {
        let max = self.max_value();
        if max <= 0.0 || value <= 0.0 {
            return 0;
        }
        ((value / max) * width as f64).round() as usize
    }

    /// Render as fixed-width text lines, one per bar.
    pub fn text_lines(&self, width: usize) -> Vec<String> {
        let label_width = self
            .bars
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0);

        self.bars
            .iter()
            .map(|bar| {
                let pad = label_width - bar.label.chars().count();
                format!(
                    "{}{} | {} {:.2}",
                    bar.label,
                    " ".repeat(pad),
                    "#".repeat(self.scaled_length(bar.value, width)),
                    bar.value
                )
            })
            .collect()
    }
}

pub fn carbon_chart(report: &Report) -> BarChart {
    BarChart {
        title: CARBON_CHART_TITLE,
        series: "Carbon_Intensity_All",
        bars: report
            .rows
            .iter()
            .map(|row| Bar {
                label: row.company.clone(),
                value: row.carbon_intensity_all,
                band: row.carbon_band,
            })
            .collect(),
    }
}

pub fn employee_chart(report: &Report) -> BarChart {
    BarChart {
        title: EMPLOYEE_CHART_TITLE,
        series: "Employee_Intensity",
        bars: report
            .rows
            .iter()
            .map(|row| Bar {
                label: row.company.clone(),
                value: row.employee_intensity,
                band: row.employee_band,
            })
            .collect(),
    }
}
