pub mod errors;

use serde::{Deserialize, Serialize};

pub use errors::{Error, Result};

/// One reporting subject as read from the input feed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EntityRecord {
    pub name: String,
    pub sector: String,
    /// Reporting-currency millions. Must be positive for ratios to exist.
    pub revenue: f64,
    pub employees: u64,
    pub emissions_scope1: f64,
    pub emissions_scope2: f64,
    /// `None` means not reported, which is different from a reported zero.
    pub emissions_scope3: Option<f64>,
}

impl EntityRecord {
    pub fn new(
        name: impl Into<String>,
        sector: impl Into<String>,
        revenue: f64,
        employees: u64,
        emissions_scope1: f64,
        emissions_scope2: f64,
    ) -> Self {
        Self {
            name: name.into(),
            sector: sector.into(),
            revenue,
            employees,
            emissions_scope1,
            emissions_scope2,
            emissions_scope3: None,
        }
    }

    pub fn with_scope3(mut self, emissions_scope3: f64) -> Self {
        self.emissions_scope3 = Some(emissions_scope3);
        self
    }

    pub fn scope3_reported(&self) -> bool {
        self.emissions_scope3.is_some()
    }
}

/// Emission totals and intensity ratios derived from an [`EntityRecord`].
///
/// Ratios are rounded to two decimals when the value is created and are
/// never recomputed from other rounded values.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct DerivedMetrics {
    pub total_emissions_core: f64,
    pub total_emissions_all: f64,
    pub carbon_intensity_core: f64,
    pub carbon_intensity_all: f64,
    pub employee_intensity: f64,
    pub scope3_reported: bool,
}

/// An entity together with its derived metrics.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MeasuredEntity {
    pub record: EntityRecord,
    pub metrics: DerivedMetrics,
}

/// Three-level severity band.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Green,
    Yellow,
    Red,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Green, Band::Yellow, Band::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Green => "green",
            Band::Yellow => "yellow",
            Band::Red => "red",
        }
    }

    /// Spreadsheet fill color for cells in this band, as `RRGGBB`.
    pub fn fill_hex(&self) -> &'static str {
        match self {
            Band::Green => "C6EFCE",
            Band::Yellow => "FFEB9C",
            Band::Red => "FFC7CE",
        }
    }

    /// [`Band::fill_hex`] as an RGB triple.
    pub fn fill_rgb(&self) -> (u8, u8, u8) {
        match self {
            Band::Green => (0xC6, 0xEF, 0xCE),
            Band::Yellow => (0xFF, 0xEB, 0x9C),
            Band::Red => (0xFF, 0xC7, 0xCE),
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independent classifications of the two intensity metrics.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BandResult {
    pub carbon_band: Band,
    pub employee_band: Band,
}

/// A fully processed entity, ready for rendering.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClassifiedEntity {
    pub record: EntityRecord,
    pub metrics: DerivedMetrics,
    pub bands: BandResult,
}
