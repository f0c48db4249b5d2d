//! Report rows handed to the writers.
//!
//! [`ReportRow`] is the output feed: the input fields followed by
//! the derived totals, ratios and bands. Column names and their order are
//! fixed by [`REPORT_COLUMNS`]; writers rely on them.

use crate::classification::{classify_all, ThresholdPolicy};
use crate::core::{Band, ClassifiedEntity, EntityRecord, MeasuredEntity, Result};
use crate::metrics::{compute_metrics, compute_metrics_parallel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Output column names, in render order.
pub const REPORT_COLUMNS: [&str; 14] = [
    "Company",
    "Sector",
    "Revenue",
    "Employees",
    "Emissions_Scope1",
    "Emissions_Scope2",
    "Emissions_Scope3",
    "Total_Emissions_Core",
    "Total_Emissions_All",
    "Carbon_Intensity_Core",
    "Carbon_Intensity_All",
    "Employee_Intensity",
    "carbonBand",
    "employeeBand",
];

/// Display text for a scope 3 value that was not reported.
pub const SCOPE3_NOT_PROVIDED: &str = "not provided";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReportRow {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
    #[serde(rename = "Employees")]
    pub employees: u64,
    #[serde(rename = "Emissions_Scope1")]
    pub emissions_scope1: f64,
    #[serde(rename = "Emissions_Scope2")]
    pub emissions_scope2: f64,
    #[serde(rename = "Emissions_Scope3")]
    pub emissions_scope3: Option<f64>,
    #[serde(rename = "Total_Emissions_Core")]
    pub total_emissions_core: f64,
    #[serde(rename = "Total_Emissions_All")]
    pub total_emissions_all: f64,
    #[serde(rename = "Carbon_Intensity_Core")]
    pub carbon_intensity_core: f64,
    #[serde(rename = "Carbon_Intensity_All")]
    pub carbon_intensity_all: f64,
    #[serde(rename = "Employee_Intensity")]
    pub employee_intensity: f64,
    #[serde(rename = "carbonBand")]
    pub carbon_band: Band,
    #[serde(rename = "employeeBand")]
    pub employee_band: Band,
}

impl ReportRow {
    /// Cell text for each column of [`REPORT_COLUMNS`], in order.
    pub fn cells(&self) -> [String; 14] {
        [
            self.company.clone(),
            self.sector.clone(),
            format_number(self.revenue),
            self.employees.to_string(),
            format_number(self.emissions_scope1),
            format_number(self.emissions_scope2),
            self.scope3_display(),
            format_number(self.total_emissions_core),
            format_number(self.total_emissions_all),
            format!("{:.2}", self.carbon_intensity_core),
            format!("{:.2}", self.carbon_intensity_all),
            format!("{:.2}", self.employee_intensity),
            self.carbon_band.to_string(),
            self.employee_band.to_string(),
        ]
    }

    pub fn scope3_display(&self) -> String {
        self.emissions_scope3
            .map(format_number)
            .unwrap_or_else(|| SCOPE3_NOT_PROVIDED.to_string())
    }
}

impl From<&ClassifiedEntity> for ReportRow {
    fn from(entity: &ClassifiedEntity) -> Self {
        let record = &entity.record;
        let metrics = &entity.metrics;
        Self {
            company: record.name.clone(),
            sector: record.sector.clone(),
            revenue: record.revenue,
            employees: record.employees,
            emissions_scope1: record.emissions_scope1,
            emissions_scope2: record.emissions_scope2,
            emissions_scope3: record.emissions_scope3,
            total_emissions_core: metrics.total_emissions_core,
            total_emissions_all: metrics.total_emissions_all,
            carbon_intensity_core: metrics.carbon_intensity_core,
            carbon_intensity_all: metrics.carbon_intensity_all,
            employee_intensity: metrics.employee_intensity,
            carbon_band: entity.bands.carbon_band,
            employee_band: entity.bands.employee_band,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BandCounts {
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
}

impl BandCounts {
    pub fn from_bands(bands: impl IntoIterator<Item = Band>) -> Self {
        bands.into_iter().fold(Self::default(), |mut counts, band| {
            match band {
                Band::Green => counts.green += 1,
                Band::Yellow => counts.yellow += 1,
                Band::Red => counts.red += 1,
            }
            counts
        })
    }

    pub fn get(&self, band: Band) -> usize {
        match band {
            Band::Green => self.green,
            Band::Yellow => self.yellow,
            Band::Red => self.red,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReportSummary {
    pub generated_at: DateTime<Utc>,
    pub policy: String,
    pub entity_count: usize,
    pub scope3_reported_count: usize,
    pub carbon_bands: BandCounts,
    pub employee_bands: BandCounts,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub summary: ReportSummary,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn from_classified(entities: &[ClassifiedEntity], policy: &ThresholdPolicy) -> Self {
        let rows: Vec<ReportRow> = entities.iter().map(ReportRow::from).collect();
        let summary = ReportSummary {
            generated_at: Utc::now(),
            policy: policy.name.clone(),
            entity_count: rows.len(),
            scope3_reported_count: rows.iter().filter(|r| r.emissions_scope3.is_some()).count(),
            carbon_bands: BandCounts::from_bands(rows.iter().map(|r| r.carbon_band)),
            employee_bands: BandCounts::from_bands(rows.iter().map(|r| r.employee_band)),
        };
        Self { summary, rows }
    }
}

/// Compute, classify and assemble a report for a batch of records.
pub fn build_report(
    records: &[EntityRecord],
    policy: &ThresholdPolicy,
    parallel: bool,
) -> Result<Report> {
    classify_report(measure_records(records, parallel)?, policy)
}

/// Calculator step of [`build_report`].
pub fn measure_records(records: &[EntityRecord], parallel: bool) -> Result<Vec<MeasuredEntity>> {
    if parallel {
        compute_metrics_parallel(records)
    } else {
        compute_metrics(records)
    }
}

/// Classifier step of [`build_report`]: band every entity and summarize.
pub fn classify_report(measured: Vec<MeasuredEntity>, policy: &ThresholdPolicy) -> Result<Report> {
    let classified = classify_all(measured, policy)?;
    let report = Report::from_classified(&classified, policy);

    info!(
        entities = report.summary.entity_count,
        carbon_red = report.summary.carbon_bands.red,
        employee_red = report.summary.employee_bands.red,
        "report built"
    );
    Ok(report)
}

/// Render a number without a trailing `.0` when it is integral.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use pretty_assertions::assert_eq;

    fn sample_records() -> Vec<EntityRecord> {
        vec![
            EntityRecord::new("Firma A", "Technologia", 200.0, 150, 5000.0, 2000.0)
                .with_scope3(15000.0),
            EntityRecord::new("Firma B", "Produkcja", 450.0, 1000, 30000.0, 10000.0),
        ]
    }

    #[test]
    fn test_build_report_rows() {
        let report = build_report(&sample_records(), &ThresholdPolicy::default(), false).unwrap();

        assert_eq!(report.rows.len(), 2);
        let a = &report.rows[0];
        assert_eq!(a.company, "Firma A");
        assert_eq!(a.carbon_intensity_all, 110.0);
        assert_eq!(a.carbon_band, Band::Red);
        assert_eq!(a.employee_band, Band::Green);

        let b = &report.rows[1];
        assert_eq!(b.carbon_intensity_all, 88.89);
        assert_eq!(b.carbon_band, Band::Green);
        assert_eq!(b.employee_intensity, 2.22);
        assert_eq!(b.employee_band, Band::Yellow);
    }

    #[test]
    fn test_summary_counts() {
        let report = build_report(&sample_records(), &ThresholdPolicy::default(), true).unwrap();

        assert_eq!(report.summary.entity_count, 2);
        assert_eq!(report.summary.scope3_reported_count, 1);
        assert_eq!(
            report.summary.carbon_bands,
            BandCounts {
                green: 1,
                yellow: 0,
                red: 1
            }
        );
        assert_eq!(report.summary.employee_bands.get(Band::Yellow), 1);
        assert_eq!(report.summary.policy, "default");
    }

    #[test]
    fn test_build_report_fails_whole_batch() {
        let mut records = sample_records();
        records[1].revenue = 0.0;
        let err = build_report(&records, &ThresholdPolicy::default(), false).unwrap_err();
        assert!(matches!(err, Error::DataValidation { .. }));
    }

    #[test]
    fn test_json_field_names_follow_column_order() {
        let report = build_report(&sample_records(), &ThresholdPolicy::default(), false).unwrap();
        let json = serde_json::to_string(&report.rows[1]).unwrap();

        let positions: Vec<usize> = REPORT_COLUMNS
            .iter()
            .map(|col| json.find(&format!("\"{col}\"")).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
        assert!(json.contains("\"Emissions_Scope3\":null"));
        assert!(json.contains("\"carbonBand\":\"green\""));
    }

    #[test]
    fn test_cells_show_missing_scope3() {
        let report = build_report(&sample_records(), &ThresholdPolicy::default(), false).unwrap();
        let cells = report.rows[1].cells();

        assert_eq!(cells[6], SCOPE3_NOT_PROVIDED);
        assert_eq!(cells[10], "88.89");
        assert_eq!(cells[13], "yellow");
        assert_eq!(report.rows[0].cells()[6], "15000");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(450.0), "450");
        assert_eq!(format_number(88.89), "88.89");
        assert_eq!(format_number(0.5), "0.5");
    }
}
