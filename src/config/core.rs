use crate::classification::ThresholdPolicy;
use crate::io::OutputFormat;
use serde::{Deserialize, Serialize};

/// Root configuration structure for esgmap
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EsgmapConfig {
    /// Carbon intensity threshold policy
    #[serde(default)]
    pub policy: Option<ThresholdPolicy>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_format")]
    pub default_format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: default_output_format(),
        }
    }
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Terminal
}

impl EsgmapConfig {
    /// Effective threshold policy, falling back to the built-in one.
    pub fn policy(&self) -> ThresholdPolicy {
        self.policy.clone().unwrap_or_default()
    }

    pub fn default_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .map(|o| o.default_format)
            .unwrap_or_else(default_output_format)
    }
}
