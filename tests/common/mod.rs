// Test utility module for esgmap integration tests
#![allow(dead_code)]

use esgmap::EntityRecord;
use std::fs;
use std::path::{Path, PathBuf};

pub const SAMPLE_JSON: &str = r#"[
  {"Company": "Firma A", "Sector": "Technologia", "Revenue": 200.0, "Employees": 150,
   "Emissions_Scope1": 5000, "Emissions_Scope2": 2000, "Emissions_Scope3": 15000},
  {"Company": "Firma B", "Sector": "Produkcja", "Revenue": 450.0, "Employees": 1000,
   "Emissions_Scope1": 30000, "Emissions_Scope2": 10000},
  {"Company": "Firma C", "Sector": "Unknown", "Revenue": 100.0, "Employees": 350,
   "Emissions_Scope1": 30000, "Emissions_Scope2": 12000, "Emissions_Scope3": 0}
]"#;

pub fn firma_a() -> EntityRecord {
    EntityRecord::new("Firma A", "Technologia", 200.0, 150, 5000.0, 2000.0).with_scope3(15000.0)
}

pub fn firma_b() -> EntityRecord {
    EntityRecord::new("Firma B", "Produkcja", 450.0, 1000, 30000.0, 10000.0)
}

pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write fixture");
    path
}
