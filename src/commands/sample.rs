use crate::core::EntityRecord;
use crate::io::{self, InputRow};
use anyhow::{Context, Result};
use std::path::Path;

/// Four-company demonstration data set.
pub fn sample_records() -> Vec<EntityRecord> {
    vec![
        EntityRecord::new("Firma A", "Technologia", 200.0, 150, 5000.0, 2000.0)
            .with_scope3(15000.0),
        EntityRecord::new("Firma B", "Produkcja", 450.0, 1000, 30000.0, 10000.0)
            .with_scope3(60000.0),
        EntityRecord::new("Firma C", "Usługi", 100.0, 60, 2500.0, 800.0).with_scope3(5000.0),
        EntityRecord::new("Firma D", "Transport", 600.0, 1500, 18000.0, 6000.0)
            .with_scope3(25000.0),
    ]
}

/// Write [`sample_records`] as a JSON input feed.
pub fn write_sample(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    let rows: Vec<InputRow> = sample_records().iter().map(InputRow::from).collect();
    let json = serde_json::to_string_pretty(&rows)?;
    io::write_file(path, &json)
        .with_context(|| format!("Failed to write sample data to {}", path.display()))?;
    tracing::info!(rows = rows.len(), "wrote sample input to {}", path.display());
    Ok(())
}
