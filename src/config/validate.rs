//! Configuration validation.

use crate::config::{Config, ModelConfig};
use crate::error::{Error, Result};

/// Look up a model by name.
pub fn get_model<'a>(config: &'a Config, name: &str) -> Result<&'a ModelConfig> {
    config.models.get(name).ok_or_else(|| Error::ModelNotFound {
        name: name.to_string(),
    })
}

/// Validate the whole configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    for (name, model) in &config.models {
        validate_model_config(name, model)?;
    }

    if let Some(default) = &config.defaults.model {
        if !config.models.contains_key(default) {
            return Err(Error::ConfigValidation {
                message: format!("defaults.model '{default}' is not a configured model"),
            });
        }
    }

    let floor = config.defaults.confidence_floor;
    let span = config.defaults.confidence_span;
    if !(0.0..=1.0).contains(&floor) {
        return Err(Error::ConfigValidation {
            message: format!("confidence_floor must be between 0.0 and 1.0, got {floor}"),
        });
    }
    if !(0.0..=1.0).contains(&span) {
        return Err(Error::ConfigValidation {
            message: format!("confidence_span must be between 0.0 and 1.0, got {span}"),
        });
    }

    Ok(())
}

/// Validate a single model configuration entry.
pub fn validate_model_config(name: &str, model: &ModelConfig) -> Result<()> {
    if model.path.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            message: format!("model '{name}' has an empty path"),
        });
    }

    if let Some(sha256) = &model.sha256 {
        let valid = sha256.len() == 64 && sha256.chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(Error::ConfigValidation {
                message: format!("model '{name}' has an invalid sha256 digest"),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn model(path: &str) -> ModelConfig {
        ModelConfig {
            path: PathBuf::from(path),
            url: None,
            sha256: None,
        }
    }

    #[test]
    fn test_get_model_missing() {
        let config = Config::default();
        assert!(matches!(
            get_model(&config, "wildlife-v1"),
            Err(Error::ModelNotFound { .. })
        ));
    }

    #[test]
    fn test_validate_default_model_must_exist() {
        let mut config = Config::default();
        config.defaults.model = Some("missing".to_string());

        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_validate_confidence_bounds() {
        let mut config = Config::default();
        config.defaults.confidence_floor = 1.5;

        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_validate_model_sha256() {
        let mut bad = model("/models/wildlife.onnx");
        bad.sha256 = Some("nothex".to_string());

        assert!(matches!(
            validate_model_config("wildlife-v1", &bad),
            Err(Error::ConfigValidation { .. })
        ));

        let mut good = model("/models/wildlife.onnx");
        good.sha256 = Some("a".repeat(64));
        assert!(validate_model_config("wildlife-v1", &good).is_ok());
    }

    #[test]
    fn test_validate_valid_config() {
        let mut config = Config::default();
        config
            .models
            .insert("wildlife-v1".to_string(), model("/models/wildlife.onnx"));
        config.defaults.model = Some("wildlife-v1".to_string());

        assert!(validate_config(&config).is_ok());
    }
}
