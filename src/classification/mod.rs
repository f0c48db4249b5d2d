//! Band classifier.
//!
//! Maps intensity ratios to [`Band`]s. Carbon intensity is classified
//! against the sector's cut points from a [`ThresholdPolicy`]; employee
//! intensity uses the fixed [`EMPLOYEE_CUTS`] for every sector.
//!
//! Classification is pure: the same value, sector and policy always give
//! the same band.
pub mod policy;

pub use policy::{
    CutPoints, ThresholdPolicy, DEFAULT_CARBON_CUTS, DEFAULT_HIGH_SENSITIVITY_SECTORS,
    HIGH_SENSITIVITY_CARBON_CUTS,
};

use crate::core::{Band, BandResult, ClassifiedEntity, Error, MeasuredEntity, Result};
use tracing::debug;

/// Employee intensity cut points, independent of sector.
pub const EMPLOYEE_CUTS: CutPoints = CutPoints {
    low_cut: 1.0,
    high_cut: 3.0,
};

/// Place a value into a band. Both cut points are yellow.
pub fn classify_value(value: f64, cuts: CutPoints) -> Band {
    if value < cuts.low_cut {
        Band::Green
    } else if value <= cuts.high_cut {
        Band::Yellow
    } else {
        Band::Red
    }
}

/// Classify both intensity metrics of a measured entity.
///
/// A non-finite metric means the calculator's guarantee was broken and
/// fails with [`Error::InvariantViolation`].
pub fn classify(entity: &MeasuredEntity, policy: &ThresholdPolicy) -> Result<BandResult> {
    let name = &entity.record.name;
    let carbon = ensure_finite(name, "Carbon_Intensity_All", entity.metrics.carbon_intensity_all)?;
    let employee = ensure_finite(name, "Employee_Intensity", entity.metrics.employee_intensity)?;

    let carbon_cuts = policy.cuts_for_sector(&entity.record.sector);

    Ok(BandResult {
        carbon_band: classify_value(carbon, carbon_cuts),
        employee_band: classify_value(employee, EMPLOYEE_CUTS),
    })
}

/// Classify a whole batch, preserving order.
pub fn classify_all(
    entities: Vec<MeasuredEntity>,
    policy: &ThresholdPolicy,
) -> Result<Vec<ClassifiedEntity>> {
    debug!(entities = entities.len(), policy = %policy.name, "classifying");
    entities
        .into_iter()
        .map(|entity| {
            let bands = classify(&entity, policy)?;
            Ok(ClassifiedEntity {
                record: entity.record,
                metrics: entity.metrics,
                bands,
            })
        })
        .collect()
}

fn ensure_finite(entity: &str, metric: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invariant(
            entity,
            metric,
            format!("classifier received non-numeric value {value}"),
        ))
    }
}
