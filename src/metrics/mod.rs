//! Metric calculator.
//!
//! Turns raw [`EntityRecord`]s into emission totals and intensity ratios.
//! The whole batch is validated: the first offending entity aborts the run
//! with [`Error::DataValidation`], so no partial result is ever produced.
//!
//! Ratios use round-half-away-from-zero at two decimals (see
//! [`round_ratio`]), applied once to the unrounded quotient.

use crate::core::{DerivedMetrics, EntityRecord, Error, MeasuredEntity, Result};
use crate::observability::par_map_with_context;
use tracing::debug;

/// Decimal places kept on every intensity ratio.
pub const RATIO_DECIMALS: i32 = 2;

/// Compute derived metrics for every record, preserving input order.
pub fn compute_metrics(records: &[EntityRecord]) -> Result<Vec<MeasuredEntity>> {
    debug!(entities = records.len(), "computing metrics");
    records.iter().map(compute_entity_metrics).collect()
}

/// Parallel variant of [`compute_metrics`].
///
/// Output order and values are identical to the sequential path. When
/// several records are invalid the reported one is not guaranteed to be
/// the first in input order. Workers inherit the caller's run context.
pub fn compute_metrics_parallel(records: &[EntityRecord]) -> Result<Vec<MeasuredEntity>> {
    debug!(entities = records.len(), "computing metrics in parallel");
    par_map_with_context(records, compute_entity_metrics)
}

/// Validate a single record and derive its metrics.
///
/// Inputs that are finite on their own can still overflow once summed or
/// divided; such a record fails with [`Error::DataValidation`] naming the
/// derived column.
pub fn compute_entity_metrics(record: &EntityRecord) -> Result<MeasuredEntity> {
    validate_record(record)?;

    let total_emissions_core = ensure_finite_derived(
        record,
        "Total_Emissions_Core",
        record.emissions_scope1 + record.emissions_scope2,
    )?;
    let total_emissions_all = ensure_finite_derived(
        record,
        "Total_Emissions_All",
        total_emissions_core + record.emissions_scope3.unwrap_or(0.0),
    )?;

    let metrics = DerivedMetrics {
        total_emissions_core,
        total_emissions_all,
        carbon_intensity_core: ratio(record, "Carbon_Intensity_Core", total_emissions_core)?,
        carbon_intensity_all: ratio(record, "Carbon_Intensity_All", total_emissions_all)?,
        employee_intensity: ratio(record, "Employee_Intensity", record.employees as f64)?,
        scope3_reported: record.scope3_reported(),
    };

    Ok(MeasuredEntity {
        record: record.clone(),
        metrics,
    })
}

/// Round to [`RATIO_DECIMALS`] places, half away from zero.
///
/// Values too large to scale are returned unchanged; at that magnitude an
/// `f64` has no fractional digits left to round.
pub fn round_ratio(value: f64) -> f64 {
    let scale = 10f64.powi(RATIO_DECIMALS);
    let scaled = value * scale;
    if scaled.is_finite() {
        scaled.round() / scale
    } else {
        value
    }
}

fn ratio(record: &EntityRecord, column: &'static str, numerator: f64) -> Result<f64> {
    ensure_finite_derived(record, column, round_ratio(numerator / record.revenue))
}

fn ensure_finite_derived(record: &EntityRecord, column: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::data_validation(
            &record.name,
            column,
            format!("overflows to {value}; check the magnitude of Revenue and emissions"),
        ))
    }
}

fn validate_record(record: &EntityRecord) -> Result<()> {
    // NaN fails both comparisons
    if !(record.revenue.is_finite() && record.revenue > 0.0) {
        return Err(Error::data_validation(
            &record.name,
            "Revenue",
            format!("must be a finite number greater than 0, got {}", record.revenue),
        ));
    }

    validate_emission(record, "Emissions_Scope1", record.emissions_scope1)?;
    validate_emission(record, "Emissions_Scope2", record.emissions_scope2)?;
    if let Some(scope3) = record.emissions_scope3 {
        validate_emission(record, "Emissions_Scope3", scope3)?;
    }

    Ok(())
}

fn validate_emission(record: &EntityRecord, field: &'static str, value: f64) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::data_validation(
            &record.name,
            field,
            format!("must be a finite non-negative number, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn firma_a() -> EntityRecord {
        EntityRecord::new("Firma A", "Technologia", 200.0, 150, 5000.0, 2000.0).with_scope3(15000.0)
    }

    fn firma_b() -> EntityRecord {
        EntityRecord::new("Firma B", "Produkcja", 450.0, 1000, 30000.0, 10000.0)
    }

    #[test]
    fn test_metrics_with_scope3() {
        let measured = compute_entity_metrics(&firma_a()).unwrap();

        assert_eq!(
            measured.metrics,
            DerivedMetrics {
                total_emissions_core: 7000.0,
                total_emissions_all: 22000.0,
                carbon_intensity_core: 35.0,
                carbon_intensity_all: 110.0,
                employee_intensity: 0.75,
                scope3_reported: true,
            }
        );
    }

    #[test]
    fn test_metrics_without_scope3() {
        let measured = compute_entity_metrics(&firma_b()).unwrap();

        assert_eq!(measured.metrics.total_emissions_all, 40000.0);
        assert_eq!(measured.metrics.total_emissions_core, 40000.0);
        assert_eq!(measured.metrics.carbon_intensity_all, 88.89);
        assert_eq!(measured.metrics.employee_intensity, 2.22);
        assert!(!measured.metrics.scope3_reported);
    }

    #[test]
    fn test_explicit_zero_scope3_matches_absent_numerically() {
        let absent = compute_entity_metrics(&firma_b()).unwrap();
        let zero = compute_entity_metrics(&firma_b().with_scope3(0.0)).unwrap();

        assert_eq!(absent.metrics.total_emissions_all, zero.metrics.total_emissions_all);
        assert_eq!(absent.metrics.carbon_intensity_all, zero.metrics.carbon_intensity_all);
        assert_ne!(absent.metrics.scope3_reported, zero.metrics.scope3_reported);
    }

    #[test]
    fn test_zero_revenue_rejected() {
        let mut record = firma_a();
        record.revenue = 0.0;

        let err = compute_metrics(&[firma_b(), record]).unwrap_err();
        match err {
            Error::DataValidation { entity, field, .. } => {
                assert_eq!(entity, "Firma A");
                assert_eq!(field, "Revenue");
            }
            other => panic!("expected data validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_and_nan_revenue_rejected() {
        for revenue in [-1.0, f64::NAN, f64::INFINITY] {
            let mut record = firma_a();
            record.revenue = revenue;
            assert!(matches!(
                compute_entity_metrics(&record),
                Err(Error::DataValidation { field: "Revenue", .. })
            ));
        }
    }

    #[test]
    fn test_negative_emissions_rejected_with_field() {
        let mut record = firma_a();
        record.emissions_scope2 = -5.0;
        assert!(matches!(
            compute_entity_metrics(&record),
            Err(Error::DataValidation { field: "Emissions_Scope2", .. })
        ));

        let record = firma_b().with_scope3(-1.0);
        assert!(matches!(
            compute_entity_metrics(&record),
            Err(Error::DataValidation { field: "Emissions_Scope3", .. })
        ));
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let records = vec![firma_b(), firma_a(), firma_b()];
        let measured = compute_metrics(&records).unwrap();

        let names: Vec<_> = measured.iter().map(|m| m.record.name.as_str()).collect();
        assert_eq!(names, vec!["Firma B", "Firma A", "Firma B"]);
    }

    #[test]
    fn test_empty_batch() {
        assert!(compute_metrics(&[]).unwrap().is_empty());
        assert!(compute_metrics_parallel(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let records: Vec<_> = (0..64)
            .map(|i| {
                EntityRecord::new(
                    format!("Firma {i}"),
                    "Transport",
                    10.0 + i as f64,
                    (i * 7) as u64,
                    1000.0 * i as f64,
                    33.3,
                )
            })
            .collect();

        assert_eq!(
            compute_metrics(&records).unwrap(),
            compute_metrics_parallel(&records).unwrap()
        );
    }

    #[test]
    fn test_total_overflow_rejected() {
        let record = EntityRecord::new("Huge", "Produkcja", 1.0, 1, 1e308, 1e308);
        match compute_metrics(&[record]).unwrap_err() {
            Error::DataValidation { entity, field, reason } => {
                assert_eq!(entity, "Huge");
                assert_eq!(field, "Total_Emissions_Core");
                assert!(reason.contains("overflows"));
            }
            other => panic!("expected data validation error, got {other:?}"),
        }

        let record = EntityRecord::new("Huge", "Produkcja", 1.0, 1, 1e308, 0.0).with_scope3(1e308);
        assert!(matches!(
            compute_entity_metrics(&record),
            Err(Error::DataValidation { field: "Total_Emissions_All", .. })
        ));
    }

    #[test]
    fn test_tiny_revenue_ratio_overflow_rejected() {
        let record = EntityRecord::new("Tiny", "Produkcja", 1e-310, 0, 10.0, 0.0);
        assert!(matches!(
            compute_entity_metrics(&record),
            Err(Error::DataValidation { field: "Carbon_Intensity_Core", .. })
        ));

        let record = EntityRecord::new("Tiny", "Produkcja", 1e-310, 5, 0.0, 0.0);
        assert!(matches!(
            compute_entity_metrics(&record),
            Err(Error::DataValidation { field: "Employee_Intensity", .. })
        ));
    }

    #[test]
    fn test_large_finite_quotient_survives_rounding() {
        let record = EntityRecord::new("Large", "Produkcja", 1.0, 1, 1e307, 0.0);
        let measured = compute_entity_metrics(&record).unwrap();

        assert_eq!(measured.metrics.carbon_intensity_all, 1e307);
        assert!(measured.metrics.carbon_intensity_core.is_finite());
    }

    #[test]
    fn test_round_ratio_half_away_from_zero() {
        assert_eq!(round_ratio(0.125), 0.13);
        assert_eq!(round_ratio(2.0 / 3.0), 0.67);
        assert_eq!(round_ratio(-0.125), -0.13);
        assert_eq!(round_ratio(110.0), 110.0);
        assert_eq!(round_ratio(f64::MAX), f64::MAX);
    }
}
