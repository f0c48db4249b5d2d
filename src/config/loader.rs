use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::EsgmapConfig;
use crate::core::{Error, Result};

/// Name of the configuration file looked up in the working directory and
/// its ancestors.
pub const CONFIG_FILE_NAME: &str = ".esgmap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse a TOML document into a configuration without validating it
pub fn parse_config(contents: &str) -> Result<EsgmapConfig> {
    Ok(toml::from_str::<EsgmapConfig>(contents)?)
}

/// Check values that deserialize fine but make no sense
pub fn validate_config(config: &EsgmapConfig) -> Result<()> {
    if let Some(policy) = &config.policy {
        policy.validate()?;
    }
    Ok(())
}

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<EsgmapConfig> {
    let config = parse_config(contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Try loading a discovered config file.
///
/// Unreadable or unparsable files are skipped with a warning. A file that
/// parses but carries invalid thresholds is an error.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Result<Option<EsgmapConfig>> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return Ok(None);
        }
    };

    let config = match parse_config(&contents) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(
                "Failed to parse {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            return Ok(None);
        }
    };

    validate_config(&config)
        .map_err(|e| Error::Configuration(format!("{}: {e}", config_path.display())))?;
    tracing::debug!("Loaded config from {}", config_path.display());
    Ok(Some(config))
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        tracing::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for a config file
pub fn discover_config(start: PathBuf) -> Result<EsgmapConfig> {
    for dir in directory_ancestors(start, MAX_TRAVERSAL_DEPTH) {
        if let Some(config) = try_load_config_from_path(&dir.join(CONFIG_FILE_NAME))? {
            return Ok(config);
        }
    }

    tracing::debug!(
        "No config found after checking {} directories. Using default config.",
        MAX_TRAVERSAL_DEPTH
    );
    Ok(EsgmapConfig::default())
}

/// Load configuration from the current directory hierarchy
pub fn load_config() -> Result<EsgmapConfig> {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            Ok(EsgmapConfig::default())
        }
    }
}

/// Load an explicitly requested config file. Every failure is an error.
pub fn load_config_from(path: &Path) -> Result<EsgmapConfig> {
    let contents = read_config_file(path).map_err(|e| {
        Error::Configuration(format!("failed to read {}: {e}", path.display()))
    })?;
    parse_and_validate_config(&contents)
        .map_err(|e| Error::Configuration(format!("{}: {e}", path.display())))
}
