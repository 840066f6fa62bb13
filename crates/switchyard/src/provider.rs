// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Construction of the configured provider backend.

use std::sync::Arc;

use switchyard_config::{Backend, SwitchyardConfig};
use switchyard_core::{ProviderAdapter, SwitchyardError};

/// Build the single provider shared by the classifier and both generators.
pub async fn build_provider(
    config: &SwitchyardConfig,
) -> Result<Arc<dyn ProviderAdapter>, SwitchyardError> {
    match config.provider.backend {
        Backend::Bedrock => bedrock(config).await,
        Backend::Anthropic => anthropic(config),
    }
}

#[cfg(feature = "bedrock")]
async fn bedrock(config: &SwitchyardConfig) -> Result<Arc<dyn ProviderAdapter>, SwitchyardError> {
    let provider = switchyard_bedrock::BedrockProvider::new(&config.bedrock).await;
    Ok(Arc::new(provider))
}

#[cfg(not(feature = "bedrock"))]
async fn bedrock(_config: &SwitchyardConfig) -> Result<Arc<dyn ProviderAdapter>, SwitchyardError> {
    Err(SwitchyardError::Config(
        "the bedrock backend is not compiled in (enable the `bedrock` feature)".into(),
    ))
}

#[cfg(feature = "anthropic")]
fn anthropic(config: &SwitchyardConfig) -> Result<Arc<dyn ProviderAdapter>, SwitchyardError> {
    let provider = switchyard_anthropic::AnthropicProvider::new(&config.anthropic)?;
    Ok(Arc::new(provider))
}

#[cfg(not(feature = "anthropic"))]
fn anthropic(_config: &SwitchyardConfig) -> Result<Arc<dyn ProviderAdapter>, SwitchyardError> {
    Err(SwitchyardError::Config(
        "the anthropic backend is not compiled in (enable the `anthropic` feature)".into(),
    ))
}
