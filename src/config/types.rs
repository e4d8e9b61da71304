//! Configuration type definitions.

use crate::constants::confidence::{DEFAULT_FLOOR, DEFAULT_SPAN};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configured models by name.
    #[serde(default)]
    pub models: HashMap<String, ModelConfig>,

    /// Default settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Configuration for a single primary model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the ONNX model file.
    pub path: PathBuf,

    /// Optional download URL for `models fetch`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Optional SHA-256 digest the downloaded file must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// Default analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default model name to use.
    pub model: Option<String>,

    /// Output file formats (empty: console report only).
    pub formats: Vec<OutputFormat>,

    /// How confidence values are derived.
    pub confidence: ConfidencePolicy,

    /// Lower bound of the simulated confidence band.
    pub confidence_floor: f64,

    /// Width of the simulated confidence band.
    pub confidence_span: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            model: None,
            formats: Vec::new(),
            confidence: ConfidencePolicy::default(),
            confidence_floor: DEFAULT_FLOOR,
            confidence_span: DEFAULT_SPAN,
        }
    }
}

/// Catalog settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to a catalog file overriding the bundled one.
    pub path: Option<PathBuf>,
}

/// How confidence values attached to results are derived.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ConfidencePolicy {
    /// Sample a narrow high band independent of the winning weight.
    #[default]
    Simulated,
    /// Report the winning weight's share of the total weight.
    Evidence,
}

impl std::fmt::Display for ConfidencePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simulated => write!(f, "simulated"),
            Self::Evidence => write!(f, "evidence"),
        }
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Generic CSV format.
    Csv,
    /// JSON result envelope.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("csv".parse::<OutputFormat>().ok(), Some(OutputFormat::Csv));
        assert_eq!(
            "JSON".parse::<OutputFormat>().ok(),
            Some(OutputFormat::Json)
        );
        assert!("raven".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_defaults_config_default_values() {
        let defaults = DefaultsConfig::default();
        assert_eq!(defaults.confidence, ConfidencePolicy::Simulated);
        assert!((defaults.confidence_floor - 0.70).abs() < f64::EPSILON);
        assert!((defaults.confidence_span - 0.25).abs() < f64::EPSILON);
        assert!(defaults.formats.is_empty());
    }
}
