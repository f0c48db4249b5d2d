//! Input feed reader.
//!
//! Rows carry the spreadsheet column names (`Company`, `Revenue`, ...).
//! `Emissions_Scope3` stays optional all the way into [`EntityRecord`]; it
//! is never defaulted here.

use crate::core::{EntityRecord, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some(other) => Err(Error::input(
                path,
                format!("unsupported input format '{other}' (expected .json, .yaml or .yml)"),
            )),
            None => Err(Error::input(
                path,
                "input file has no extension (expected .json, .yaml or .yml)",
            )),
        }
    }
}

/// Largest headcount an `f64` represents exactly (2^53).
pub const MAX_EXACT_HEADCOUNT: f64 = 9_007_199_254_740_992.0;

/// One row of the input feed, as it appears in the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRow {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
    /// Read as a float so negative or fractional headcounts can be
    /// reported against the entity instead of failing deserialization.
    #[serde(rename = "Employees")]
    pub employees: f64,
    #[serde(rename = "Emissions_Scope1")]
    pub emissions_scope1: f64,
    #[serde(rename = "Emissions_Scope2")]
    pub emissions_scope2: f64,
    #[serde(
        rename = "Emissions_Scope3",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub emissions_scope3: Option<f64>,
}

impl TryFrom<InputRow> for EntityRecord {
    type Error = Error;

    fn try_from(row: InputRow) -> Result<Self> {
        let employees = row.employees;
        if !(employees.is_finite()
            && employees >= 0.0
            && employees.fract() == 0.0
            && employees <= MAX_EXACT_HEADCOUNT)
        {
            return Err(Error::data_validation(
                row.company,
                "Employees",
                format!("must be a non-negative whole number, got {employees}"),
            ));
        }

        Ok(EntityRecord {
            name: row.company,
            sector: row.sector,
            revenue: row.revenue,
            employees: employees as u64,
            emissions_scope1: row.emissions_scope1,
            emissions_scope2: row.emissions_scope2,
            emissions_scope3: row.emissions_scope3,
        })
    }
}

impl From<&EntityRecord> for InputRow {
    fn from(record: &EntityRecord) -> Self {
        Self {
            company: record.name.clone(),
            sector: record.sector.clone(),
            revenue: record.revenue,
            employees: record.employees as f64,
            emissions_scope1: record.emissions_scope1,
            emissions_scope2: record.emissions_scope2,
            emissions_scope3: record.emissions_scope3,
        }
    }
}

/// Parse rows from an in-memory document.
pub fn parse_entities(contents: &str, format: InputFormat) -> Result<Vec<EntityRecord>> {
    let rows: Vec<InputRow> = match format {
        InputFormat::Json => serde_json::from_str(contents)?,
        InputFormat::Yaml => serde_yaml::from_str(contents)?,
    };
    rows.into_iter().map(EntityRecord::try_from).collect()
}

/// Read and parse an input file, choosing the format from its extension.
pub fn read_entities(path: &Path) -> Result<Vec<EntityRecord>> {
    let format = InputFormat::from_path(path)?;
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::input(path, format!("failed to read input: {e}")))?;

    let records = parse_entities(&contents, format).map_err(|e| match e {
        Error::Json(_) | Error::Yaml(_) => Error::input(path, e.to_string()),
        other => other,
    })?;

    debug!(path = %path.display(), rows = records.len(), "read input feed");
    Ok(records)
}
