use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A pair of cut points splitting a metric into three bands.
///
/// `value < low_cut` is green, `low_cut <= value <= high_cut` is yellow,
/// anything above `high_cut` is red. Both cut points belong to yellow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutPoints {
    pub low_cut: f64,
    pub high_cut: f64,
}

impl CutPoints {
    pub fn new(low_cut: f64, high_cut: f64) -> Result<Self> {
        let cuts = Self { low_cut, high_cut };
        cuts.validate()?;
        Ok(cuts)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.low_cut.is_finite() || !self.high_cut.is_finite() {
            return Err(Error::Configuration(format!(
                "cut points must be finite numbers, got ({}, {})",
                self.low_cut, self.high_cut
            )));
        }
        if self.low_cut > self.high_cut {
            return Err(Error::Configuration(format!(
                "low_cut ({}) must not exceed high_cut ({})",
                self.low_cut, self.high_cut
            )));
        }
        Ok(())
    }
}

/// Carbon intensity cut points for high-sensitivity sectors (office/services).
pub const HIGH_SENSITIVITY_CARBON_CUTS: CutPoints = CutPoints {
    low_cut: 40.0,
    high_cut: 100.0,
};

/// Carbon intensity cut points for every other sector.
pub const DEFAULT_CARBON_CUTS: CutPoints = CutPoints {
    low_cut: 150.0,
    high_cut: 400.0,
};

/// Sectors that use [`HIGH_SENSITIVITY_CARBON_CUTS`] out of the box.
pub const DEFAULT_HIGH_SENSITIVITY_SECTORS: &[&str] = &["Technologia", "Usługi"];

/// Named partition of sectors into a tight band and a default band for
/// carbon intensity.
///
/// Sector lookup is a case-sensitive exact match. Sectors not listed fall
/// back to the default band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    #[serde(default = "default_policy_name")]
    pub name: String,

    #[serde(default = "default_high_sensitivity_sectors")]
    pub high_sensitivity_sectors: BTreeSet<String>,

    #[serde(default = "default_high_sensitivity_cuts")]
    pub high_sensitivity: CutPoints,

    #[serde(default = "default_default_cuts")]
    pub default: CutPoints,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            name: default_policy_name(),
            high_sensitivity_sectors: default_high_sensitivity_sectors(),
            high_sensitivity: default_high_sensitivity_cuts(),
            default: default_default_cuts(),
        }
    }
}

impl ThresholdPolicy {
    pub fn new(
        name: impl Into<String>,
        high_sensitivity_sectors: impl IntoIterator<Item = impl Into<String>>,
        high_sensitivity: CutPoints,
        default: CutPoints,
    ) -> Result<Self> {
        let policy = Self {
            name: name.into(),
            high_sensitivity_sectors: high_sensitivity_sectors
                .into_iter()
                .map(Into::into)
                .collect(),
            high_sensitivity,
            default,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Replace the high-sensitivity sector set, keeping cut points.
    pub fn with_high_sensitivity_sectors(
        mut self,
        sectors: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.high_sensitivity_sectors = sectors.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_high_sensitivity(&self, sector: &str) -> bool {
        self.high_sensitivity_sectors.contains(sector)
    }

    /// Carbon intensity cut points that apply to `sector`.
    pub fn cuts_for_sector(&self, sector: &str) -> CutPoints {
        if self.is_high_sensitivity(sector) {
            self.high_sensitivity
        } else {
            self.default
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.high_sensitivity
            .validate()
            .map_err(|e| Error::Configuration(format!("policy '{}' high_sensitivity: {e}", self.name)))?;
        self.default
            .validate()
            .map_err(|e| Error::Configuration(format!("policy '{}' default: {e}", self.name)))
    }
}

fn default_policy_name() -> String {
    "default".to_string()
}

fn default_high_sensitivity_sectors() -> BTreeSet<String> {
    DEFAULT_HIGH_SENSITIVITY_SECTORS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_high_sensitivity_cuts() -> CutPoints {
    HIGH_SENSITIVITY_CARBON_CUTS
}

fn default_default_cuts() -> CutPoints {
    DEFAULT_CARBON_CUTS
}
