use crate::classification::ThresholdPolicy;
use crate::config::{load_config, load_config_from, EsgmapConfig};
use crate::formatting::{ColorMode, FormattingConfig};
use crate::io::{create_writer, read_entities, OutputFormat};
use crate::observability::{set_input_file, set_phase, RunPhase};
use crate::report::{classify_report, measure_records, Report};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, info_span};

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub high_sensitivity_sectors: Vec<String>,
    pub parallel: bool,
    pub formatting: FormattingConfig,
}

impl ReportConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            format: None,
            output: None,
            config: None,
            high_sensitivity_sectors: Vec::new(),
            parallel: false,
            formatting: FormattingConfig::default(),
        }
    }
}

pub fn handle_report(config: ReportConfig) -> Result<()> {
    let _span = info_span!("report", input = %config.input.display()).entered();

    let file_config = {
        let _phase = set_phase(RunPhase::ConfigLoading);
        load_file_config(&config)?
    };
    let policy = resolve_policy(&file_config, &config.high_sensitivity_sectors);
    let format = config.format.unwrap_or_else(|| file_config.default_format());

    let report = generate_report(&config, &policy)?;

    let _phase = set_phase(RunPhase::Rendering);
    render(&report, format, &config)?;
    info!(format = ?format, "report written");
    Ok(())
}

/// Read the input feed and run it through the calculator and classifier.
pub fn generate_report(config: &ReportConfig, policy: &ThresholdPolicy) -> Result<Report> {
    let _file = set_input_file(&config.input);

    let records = {
        let _phase = set_phase(RunPhase::InputLoading);
        read_entities(&config.input)?
    };

    let measured = {
        let _phase = set_phase(RunPhase::MetricComputation);
        measure_records(&records, config.parallel).with_context(|| {
            format!("computing metrics for {}", config.input.display())
        })?
    };

    let _phase = set_phase(RunPhase::Classification);
    classify_report(measured, policy).with_context(|| {
        format!("classifying {} with policy '{}'", config.input.display(), policy.name)
    })
}

fn load_file_config(config: &ReportConfig) -> Result<EsgmapConfig> {
    let loaded = match &config.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(loaded)
}

/// Policy from the config file, with CLI sector overrides applied.
pub fn resolve_policy(file_config: &EsgmapConfig, sectors: &[String]) -> ThresholdPolicy {
    let policy = file_config.policy();
    if sectors.is_empty() {
        policy
    } else {
        policy.with_high_sensitivity_sectors(sectors.iter().cloned())
    }
}

fn render(report: &Report, format: OutputFormat, config: &ReportConfig) -> Result<()> {
    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            let mut buffered = BufWriter::new(file);
            {
                let mut writer = create_writer(format, Box::new(&mut buffered), false);
                writer.write_report(report)?;
            }
            buffered.flush()?;
            eprintln!("Report written to {}", path.display());
        }
        None => {
            let use_color = format == OutputFormat::Terminal && config.formatting.apply();
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            {
                let mut writer = create_writer(format, Box::new(&mut handle), use_color);
                writer.write_report(report)?;
            }
            handle.flush()?;
        }
    }
    Ok(())
}

/// Formatting settings from the `--color` / `--plain` flags and environment.
pub fn formatting_from_flags(color: Option<ColorMode>, plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else if let Some(mode) = color {
        FormattingConfig::new(mode)
    } else {
        FormattingConfig::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Band;
    use crate::core::Error;
    use crate::config::parse_and_validate_config;
    use crate::report::build_report;
    use std::fs;
    use tempfile::TempDir;

    const INPUT: &str = r#"[
        {"Company": "Firma A", "Sector": "Technologia", "Revenue": 200.0, "Employees": 150,
         "Emissions_Scope1": 5000, "Emissions_Scope2": 2000, "Emissions_Scope3": 15000},
        {"Company": "Firma B", "Sector": "Produkcja", "Revenue": 450.0, "Employees": 1000,
         "Emissions_Scope1": 30000, "Emissions_Scope2": 10000}
    ]"#;

    fn write_input(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("input.json");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_generate_report_from_file() {
        let dir = TempDir::new().unwrap();
        let config = ReportConfig::new(write_input(&dir, INPUT));

        let report = generate_report(&config, &ThresholdPolicy::default()).unwrap();

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].carbon_band, Band::Red);
        assert_eq!(report.rows[1].employee_band, Band::Yellow);
    }

    #[test]
    fn test_sector_override_changes_carbon_band() {
        let dir = TempDir::new().unwrap();
        let config = ReportConfig::new(write_input(&dir, INPUT));
        let policy = resolve_policy(&EsgmapConfig::default(), &["Produkcja".to_string()]);

        let report = generate_report(&config, &policy).unwrap();

        // 88.89 against the tight band (40, 100)
        assert_eq!(report.rows[1].carbon_band, Band::Yellow);
        // Technologia is no longer high-sensitivity: 110 < 150
        assert_eq!(report.rows[0].carbon_band, Band::Green);
    }

    #[test]
    fn test_resolve_policy_keeps_configured_when_no_override() {
        let file_config =
            parse_and_validate_config("[policy]\nname = \"custom\"\n").unwrap();
        assert_eq!(resolve_policy(&file_config, &[]).name, "custom");
    }

    #[test]
    fn test_generate_report_rows_match_library_pipeline() {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, INPUT);
        let policy = ThresholdPolicy::default();
        let expected = build_report(&read_entities(&path).unwrap(), &policy, false).unwrap();

        for parallel in [false, true] {
            let mut config = ReportConfig::new(&path);
            config.parallel = parallel;
            let report = generate_report(&config, &policy).unwrap();
            assert_eq!(report.rows, expected.rows);
            assert_eq!(report.summary.carbon_bands, expected.summary.carbon_bands);
        }
    }

    #[test]
    fn test_zero_revenue_surfaces_data_validation_error() {
        let dir = TempDir::new().unwrap();
        let input = INPUT.replace("\"Revenue\": 450.0", "\"Revenue\": 0");
        let config = ReportConfig::new(write_input(&dir, &input));

        let err = generate_report(&config, &ThresholdPolicy::default()).unwrap_err();
        let err = err.downcast_ref::<Error>().unwrap();
        assert!(matches!(err, Error::DataValidation { entity, .. } if entity == "Firma B"));
    }

    #[test]
    fn test_handle_report_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("report.json");
        let config_path = dir.path().join("esgmap.toml");
        fs::write(&config_path, "").unwrap();

        let mut config = ReportConfig::new(write_input(&dir, INPUT));
        config.format = Some(OutputFormat::Json);
        config.output = Some(output.clone());
        config.config = Some(config_path);

        handle_report(config).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(json["rows"][0]["carbonBand"], "red");
    }

    #[test]
    fn test_formatting_from_flags() {
        assert_eq!(formatting_from_flags(Some(ColorMode::Always), true), FormattingConfig::plain());
        assert_eq!(
            formatting_from_flags(Some(ColorMode::Always), false).color,
            ColorMode::Always
        );
    }
}
