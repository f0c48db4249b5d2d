//! Configuration loaded from `.esgmap.toml`.
mod core;
mod loader;

pub use self::core::{EsgmapConfig, OutputConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from, parse_and_validate_config,
    parse_config, validate_config, CONFIG_FILE_NAME,
};

/// Commented configuration written by `esgmap init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# esgmap configuration

[policy]
name = "default"
# Sectors classified with the tighter carbon intensity band.
# Matching is exact and case-sensitive; other sectors use `default`.
high_sensitivity_sectors = ["Technologia", "Usługi"]
high_sensitivity = { low_cut = 40.0, high_cut = 100.0 }
default = { low_cut = 150.0, high_cut = 400.0 }

[output]
# terminal | json | markdown | html
default_format = "terminal"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::{CutPoints, ThresholdPolicy};
    use crate::core::Error;
    use crate::io::OutputFormat;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_template_matches_builtin_defaults() {
        let config = parse_and_validate_config(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.policy(), ThresholdPolicy::default());
        assert_eq!(config.default_format(), OutputFormat::Terminal);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_and_validate_config("").unwrap();
        assert!(config.policy.is_none());
        assert_eq!(config.policy(), ThresholdPolicy::default());
    }

    #[test]
    fn test_custom_policy() {
        let config = parse_and_validate_config(indoc! {r#"
            [policy]
            name = "finance"
            high_sensitivity_sectors = ["Finanse", "Usługi"]
            high_sensitivity = { low_cut = 20.0, high_cut = 60.0 }

            [output]
            default_format = "markdown"
        "#})
        .unwrap();

        let policy = config.policy();
        assert_eq!(policy.name, "finance");
        assert!(policy.is_high_sensitivity("Finanse"));
        assert!(!policy.is_high_sensitivity("Technologia"));
        assert_eq!(policy.high_sensitivity, CutPoints { low_cut: 20.0, high_cut: 60.0 });
        assert_eq!(policy.default, CutPoints { low_cut: 150.0, high_cut: 400.0 });
        assert_eq!(config.default_format(), OutputFormat::Markdown);
    }

    #[test]
    fn test_inverted_cuts_rejected() {
        let err = parse_and_validate_config(indoc! {r#"
            [policy]
            default = { low_cut = 500.0, high_cut = 100.0 }
        "#})
        .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_discover_config_in_ancestor() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[policy]\nname = \"found\"\n",
        )
        .unwrap();

        let config = discover_config(nested).unwrap();
        assert_eq!(config.policy().name, "found");
    }

    #[test]
    fn test_discover_skips_unparsable_file() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(CONFIG_FILE_NAME), "[policy\nbroken").unwrap();

        let config = discover_config(root.path().to_path_buf()).unwrap();
        assert!(config.policy.is_none());
    }

    #[test]
    fn test_discover_rejects_invalid_thresholds() {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[policy]\nhigh_sensitivity = { low_cut = 9.0, high_cut = 1.0 }\n",
        )
        .unwrap();

        assert!(discover_config(root.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let root = TempDir::new().unwrap();
        let err = load_config_from(&root.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_directory_ancestors_depth_limit() {
        let dirs: Vec<_> = directory_ancestors("/a/b/c/d".into(), 2).collect();
        assert_eq!(dirs.len(), 2);
    }
}
