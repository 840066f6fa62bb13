// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Messages API provider adapter for Switchyard.
//!
//! This crate implements [`ProviderAdapter`] against the Anthropic Messages
//! API directly, as an alternative to Amazon Bedrock.

pub mod client;
pub mod types;

use async_trait::async_trait;
use switchyard_config::model::AnthropicConfig;
use switchyard_core::{ProviderAdapter, ProviderRequest, ProviderResponse, SwitchyardError, TokenUsage};
use tracing::info;

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest};

/// Anthropic provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `ANTHROPIC_API_KEY` env var -> error.
pub struct AnthropicProvider {
    client: AnthropicClient,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider from the given configuration.
    ///
    /// # API Key Resolution
    /// 1. `config.api_key` if set and non-empty
    /// 2. `ANTHROPIC_API_KEY` environment variable
    /// 3. Returns error if neither is available
    pub fn new(config: &AnthropicConfig) -> Result<Self, SwitchyardError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let mut client = AnthropicClient::new(&api_key, &config.api_version)?;
        if let Some(url) = &config.base_url {
            client = client.with_base_url(url.clone());
        }

        info!(endpoint = client.base_url(), "Anthropic provider initialized");

        Ok(Self::with_client(client))
    }

    /// Creates a provider with an existing client.
    pub fn with_client(client: AnthropicClient) -> Self {
        Self { client }
    }

    fn to_message_request(request: &ProviderRequest) -> MessageRequest {
        MessageRequest {
            model: request.model.clone(),
            messages: vec![ApiMessage::user(request.prompt.clone())],
            max_tokens: request.params.max_tokens,
            temperature: request.params.temperature,
            top_p: request.params.top_p,
        }
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, SwitchyardError> {
        let api_request = Self::to_message_request(&request);
        let response = self.client.complete_message(&api_request).await?;
        let content = response
            .text()
            .ok_or_else(|| SwitchyardError::provider("response contained no text content"))?;

        Ok(ProviderResponse {
            content,
            model: response.model,
            stop_reason: response.stop_reason,
            usage: TokenUsage::new(response.usage.input_tokens, response.usage.output_tokens),
        })
    }
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, SwitchyardError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
        SwitchyardError::Config(
            "Anthropic API key not found. Set anthropic.api_key in config or ANTHROPIC_API_KEY environment variable.".into(),
        )
    })
}
