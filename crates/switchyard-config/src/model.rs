// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Switchyard prompt router.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Top-level Switchyard configuration.
///
/// Every section is optional and defaults to the values the router was
/// designed around (Nova Lite classifier, Haiku/Sonnet generators on Bedrock).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SwitchyardConfig {
    /// Process-wide settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Which hosted backend serves both the classifier and generator calls.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// AWS Bedrock settings.
    #[serde(default)]
    pub bedrock: BedrockConfig,

    /// Anthropic API settings.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Classifier and generator model identifiers.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Markdown transcript settings.
    #[serde(default)]
    pub transcript: TranscriptConfig,

    /// Batch driver settings.
    #[serde(default)]
    pub batch: BatchConfig,
}

impl SwitchyardConfig {
    /// Render the effective configuration as TOML with secrets replaced.
    pub fn to_redacted_toml(&self) -> Result<String, toml::ser::Error> {
        let mut shown = self.clone();
        if shown.anthropic.api_key.is_some() {
            shown.anthropic.api_key = Some("<redacted>".to_string());
        }
        toml::to_string_pretty(&shown)
    }
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Hosted model backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Backend {
    /// AWS Bedrock Converse API.
    #[default]
    Bedrock,
    /// Anthropic Messages API.
    Anthropic,
}

/// Backend selection.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Backend used for every model call.
    #[serde(default)]
    pub backend: Backend,
}

/// AWS Bedrock configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BedrockConfig {
    /// AWS region hosting the models.
    #[serde(default = "default_region")]
    pub region: String,

    /// Named AWS profile. `None` uses the default credential chain.
    #[serde(default)]
    pub profile: Option<String>,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            profile: None,
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}

/// Anthropic API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// Anthropic API key. `None` requires the `ANTHROPIC_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Anthropic API version string.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Override for the Messages endpoint URL.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_version: default_api_version(),
            base_url: None,
        }
    }
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

/// Model identifiers for the classifier and the two generators.
///
/// The classifier instruction text and the inference parameters are fixed
/// in code and are not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Small model consulted for the 0/1 routing signal.
    #[serde(default = "default_classifier_model")]
    pub classifier_model: String,

    /// Generator used for simple prompts.
    #[serde(default = "default_compact_model")]
    pub compact_model: String,

    /// Generator used for complex prompts (and whenever classification is unusable).
    #[serde(default = "default_capable_model")]
    pub capable_model: String,

    /// Friendly name shown for the compact generator.
    #[serde(default = "default_compact_label")]
    pub compact_label: String,

    /// Friendly name shown for the capable generator.
    #[serde(default = "default_capable_label")]
    pub capable_label: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            classifier_model: default_classifier_model(),
            compact_model: default_compact_model(),
            capable_model: default_capable_model(),
            compact_label: default_compact_label(),
            capable_label: default_capable_label(),
        }
    }
}

fn default_classifier_model() -> String {
    "us.amazon.nova-lite-v1:0".to_string()
}

fn default_compact_model() -> String {
    "us.anthropic.claude-3-5-haiku-20241022-v1:0".to_string()
}

fn default_capable_model() -> String {
    "us.anthropic.claude-3-5-sonnet-20241022-v2:0".to_string()
}

fn default_compact_label() -> String {
    "Claude 3.5 Haiku".to_string()
}

fn default_capable_label() -> String {
    "Claude 3.7 Sonnet".to_string()
}

/// Markdown transcript configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptConfig {
    /// Write one transcript per completed cycle in batch and ask modes.
    #[serde(default = "default_transcript_enabled")]
    pub enabled: bool,

    /// Directory receiving `result_<timestamp>.md` files. Created if absent.
    #[serde(default = "default_transcript_directory")]
    pub directory: String,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            enabled: default_transcript_enabled(),
            directory: default_transcript_directory(),
        }
    }
}

fn default_transcript_enabled() -> bool {
    true
}

fn default_transcript_directory() -> String {
    "results".to_string()
}

/// Batch driver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BatchConfig {
    /// TOML file holding `prompts = [...]`. A missing file falls back to built-ins.
    #[serde(default = "default_prompts_file")]
    pub prompts_file: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            prompts_file: default_prompts_file(),
        }
    }
}

fn default_prompts_file() -> String {
    "prompts.toml".to_string()
}
