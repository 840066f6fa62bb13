// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde attributes cannot express, such as
//! non-empty model identifiers and backend-specific required settings.

use tracing::warn;

use crate::diagnostic::ConfigError;
use crate::model::{Backend, SwitchyardConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Prefixes Bedrock puts on model and inference-profile ids.
const BEDROCK_ID_PREFIXES: &[&str] = &["us.", "eu.", "apac.", "amazon.", "anthropic.", "meta."];

/// Whether a model id has the shape of a Bedrock model or inference profile id.
fn is_bedrock_model_id(id: &str) -> bool {
    id.contains(':') || BEDROCK_ID_PREFIXES.iter().any(|p| id.starts_with(p))
}

/// Routing keys holding a Bedrock-style model id while the backend is Anthropic.
pub fn mismatched_model_ids(config: &SwitchyardConfig) -> Vec<(&'static str, &str)> {
    if config.provider.backend != Backend::Anthropic {
        return Vec::new();
    }
    [
        ("routing.classifier_model", config.routing.classifier_model.as_str()),
        ("routing.compact_model", config.routing.compact_model.as_str()),
        ("routing.capable_model", config.routing.capable_model.as_str()),
    ]
    .into_iter()
    .filter(|(_, id)| is_bedrock_model_id(id))
    .collect()
}

/// Log a warning for every routing model id the backend cannot serve.
pub fn warn_on_model_mismatch(config: &SwitchyardConfig) {
    for (key, model) in mismatched_model_ids(config) {
        warn!(key, model, "model id looks like a Bedrock id but provider.backend is anthropic");
    }
}

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure rather than stopping at the first one.
pub fn validate_config(config: &SwitchyardConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let required = [
        ("routing.classifier_model", &config.routing.classifier_model),
        ("routing.compact_model", &config.routing.compact_model),
        ("routing.capable_model", &config.routing.capable_model),
        ("routing.compact_label", &config.routing.compact_label),
        ("routing.capable_label", &config.routing.capable_label),
        ("batch.prompts_file", &config.batch.prompts_file),
    ];
    for (key, value) in required {
        if value.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
    }

    if !LOG_LEVELS.contains(&config.general.log_level.to_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "general.log_level `{}` is not one of: {}",
                config.general.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.transcript.enabled && config.transcript.directory.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "transcript.directory must not be empty when transcripts are enabled"
                .to_string(),
        });
    }

    if config.provider.backend == Backend::Bedrock && config.bedrock.region.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "bedrock.region must not be empty when provider.backend = \"bedrock\""
                .to_string(),
        });
    }

    if let Some(url) = &config.anthropic.base_url
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        errors.push(ConfigError::Validation {
            message: format!("anthropic.base_url `{url}` must start with http:// or https://"),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&SwitchyardConfig::default()).is_ok());
    }

    #[test]
    fn empty_model_fails_validation() {
        let mut config = SwitchyardConfig::default();
        config.routing.capable_model = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "routing.capable_model"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = SwitchyardConfig::default();
        config.routing.classifier_model = String::new();
        config.routing.compact_model = String::new();
        config.general.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn empty_directory_only_matters_when_enabled() {
        let mut config = SwitchyardConfig::default();
        config.transcript.directory = String::new();
        assert!(has_message(
            &validate_config(&config).unwrap_err(),
            "transcript.directory"
        ));

        config.transcript.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_region_only_matters_for_bedrock() {
        let mut config = SwitchyardConfig::default();
        config.bedrock.region = String::new();
        assert!(has_message(
            &validate_config(&config).unwrap_err(),
            "bedrock.region"
        ));

        config.provider.backend = Backend::Anthropic;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn bedrock_ids_are_recognised() {
        assert!(is_bedrock_model_id("us.amazon.nova-lite-v1:0"));
        assert!(is_bedrock_model_id("anthropic.claude-3-haiku-20240307-v1:0"));
        assert!(!is_bedrock_model_id("claude-3-5-haiku-latest"));
        assert!(!is_bedrock_model_id("claude-sonnet-4-20250514"));
    }

    #[test]
    fn default_ids_mismatch_only_under_anthropic() {
        let mut config = SwitchyardConfig::default();
        assert!(mismatched_model_ids(&config).is_empty());

        config.provider.backend = Backend::Anthropic;
        let keys: Vec<&str> = mismatched_model_ids(&config)
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(
            keys,
            [
                "routing.classifier_model",
                "routing.compact_model",
                "routing.capable_model"
            ]
        );

        config.routing.classifier_model = "claude-3-5-haiku-latest".to_string();
        config.routing.compact_model = "claude-3-5-haiku-latest".to_string();
        config.routing.capable_model = "claude-sonnet-4-20250514".to_string();
        assert!(mismatched_model_ids(&config).is_empty());
    }

    #[test]
    #[tracing_test::traced_test]
    fn bedrock_backend_does_not_warn() {
        warn_on_model_mismatch(&SwitchyardConfig::default());
        assert!(!logs_contain("model id looks like a Bedrock id"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn anthropic_backend_with_bedrock_ids_warns() {
        let mut config = SwitchyardConfig::default();
        config.provider.backend = Backend::Anthropic;
        assert!(validate_config(&config).is_ok());
        warn_on_model_mismatch(&config);
        assert!(logs_contain("model id looks like a Bedrock id"));
        assert!(logs_contain("us.amazon.nova-lite-v1:0"));
    }

    #[test]
    fn base_url_needs_scheme() {
        let mut config = SwitchyardConfig::default();
        config.anthropic.base_url = Some("localhost:8080".to_string());
        assert!(has_message(
            &validate_config(&config).unwrap_err(),
            "anthropic.base_url"
        ));
    }
}
