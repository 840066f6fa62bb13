// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Amazon Bedrock provider adapter using the Converse API.
//!
//! Credentials come from the standard AWS chain (environment, shared
//! profile, SSO, instance role), optionally pinned to a named profile.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::error::SdkError;
use aws_sdk_bedrockruntime::operation::converse::ConverseError;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, ConverseOutput, InferenceConfiguration, Message,
};
use switchyard_config::model::BedrockConfig;
use switchyard_core::{
    InferenceParams, ProviderAdapter, ProviderRequest, ProviderResponse, SwitchyardError,
    TokenUsage,
};
use tracing::{debug, info};

/// Bedrock provider implementing [`ProviderAdapter`].
pub struct BedrockProvider {
    client: Client,
    region: String,
}

impl BedrockProvider {
    /// Create a provider for `config.region`, loading AWS credentials.
    pub async fn new(config: &BedrockConfig) -> Self {
        let mut builder = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if let Some(profile) = &config.profile {
            builder = builder.profile_name(profile);
        }
        let sdk_config = builder.load().await;

        info!(
            region = config.region.as_str(),
            profile = config.profile.as_deref().unwrap_or("default"),
            "Bedrock provider initialized"
        );

        Self {
            client: Client::new(&sdk_config),
            region: config.region.clone(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

#[async_trait]
impl ProviderAdapter for BedrockProvider {
    fn name(&self) -> &str {
        "bedrock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, SwitchyardError> {
        let message = user_message(&request.prompt)?;

        let response = self
            .client
            .converse()
            .model_id(&request.model)
            .set_messages(Some(vec![message]))
            .inference_config(inference_config(&request.params))
            .send()
            .await
            .map_err(|e| map_sdk_error(&e))?;

        let content = extract_text(response.output())?;
        let usage = extract_token_usage(response.usage());
        let stop_reason = response.stop_reason().as_str().to_string();

        debug!(
            model = request.model.as_str(),
            stop_reason = stop_reason.as_str(),
            "converse call complete"
        );

        Ok(ProviderResponse {
            content,
            model: request.model,
            stop_reason: Some(stop_reason),
            usage,
        })
    }
}

/// Wrap the prompt as the single user turn of a conversation.
fn user_message(prompt: &str) -> Result<Message, SwitchyardError> {
    Message::builder()
        .role(ConversationRole::User)
        .content(ContentBlock::Text(prompt.to_string()))
        .build()
        .map_err(|e| SwitchyardError::Provider {
            message: format!("failed to build Bedrock message: {e}"),
            source: Some(Box::new(e)),
        })
}

fn inference_config(params: &InferenceParams) -> InferenceConfiguration {
    InferenceConfiguration::builder()
        .max_tokens(i32::try_from(params.max_tokens).unwrap_or(i32::MAX))
        .temperature(params.temperature)
        .set_top_p(params.top_p)
        .build()
}

/// Concatenate the text blocks of the Converse output message.
fn extract_text(output: Option<&ConverseOutput>) -> Result<String, SwitchyardError> {
    let output =
        output.ok_or_else(|| SwitchyardError::provider("Converse response has no output"))?;

    let message = output
        .as_message()
        .map_err(|_| SwitchyardError::provider("Converse output is not a message"))?;

    let mut blocks = message
        .content()
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text(t) => Some(t.as_str()),
            // Reasoning, citations and other block types carry no reply text.
            _ => None,
        })
        .peekable();

    if blocks.peek().is_none() {
        return Err(SwitchyardError::provider(
            "response contained no text content",
        ));
    }
    Ok(blocks.collect())
}

/// Token usage from the response, converting i32 to u32 safely.
fn extract_token_usage(usage: Option<&aws_sdk_bedrockruntime::types::TokenUsage>) -> TokenUsage {
    match usage {
        Some(u) => TokenUsage::new(
            u32::try_from(u.input_tokens()).unwrap_or(0),
            u32::try_from(u.output_tokens()).unwrap_or(0),
        ),
        None => TokenUsage::default(),
    }
}

fn map_sdk_error<R: std::fmt::Debug>(error: &SdkError<ConverseError, R>) -> SwitchyardError {
    let message = match error {
        SdkError::ServiceError(service_err) => match service_err.err() {
            ConverseError::ModelTimeoutException(e) => {
                format!("Model timeout: {}", e.message().unwrap_or("unknown"))
            }
            ConverseError::ModelNotReadyException(e) => {
                format!("Model not ready: {}", e.message().unwrap_or("unknown"))
            }
            ConverseError::ThrottlingException(e) => {
                format!("Throttled: {}", e.message().unwrap_or("unknown"))
            }
            ConverseError::ValidationException(e) => {
                format!("Validation error: {}", e.message().unwrap_or("unknown"))
            }
            ConverseError::AccessDeniedException(e) => {
                format!("Access denied: {}", e.message().unwrap_or("unknown"))
            }
            ConverseError::ResourceNotFoundException(e) => {
                format!("Resource not found: {}", e.message().unwrap_or("unknown"))
            }
            ConverseError::ModelErrorException(e) => {
                format!("Model error: {}", e.message().unwrap_or("unknown"))
            }
            ConverseError::InternalServerException(e) => {
                format!("Internal server error: {}", e.message().unwrap_or("unknown"))
            }
            ConverseError::ServiceUnavailableException(e) => {
                format!("Service unavailable: {}", e.message().unwrap_or("unknown"))
            }
            other => format!("Bedrock service error: {other}"),
        },
        SdkError::TimeoutError(_) => "Request timed out".to_string(),
        SdkError::DispatchFailure(e) => format!("Connection error: {e:?}"),
        other => format!("AWS SDK error: {other}"),
    };
    SwitchyardError::provider(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output_with(blocks: Vec<ContentBlock>) -> ConverseOutput {
        let message = Message::builder()
            .role(ConversationRole::Assistant)
            .set_content(Some(blocks))
            .build()
            .unwrap();
        ConverseOutput::Message(message)
    }

    #[test]
    fn user_message_holds_prompt_verbatim() {
        let message = user_message("  量子  ").unwrap();
        assert_eq!(*message.role(), ConversationRole::User);
        assert_eq!(message.content().len(), 1);
        assert_eq!(message.content()[0].as_text().unwrap(), "  量子  ");
    }

    #[test]
    fn inference_config_for_classification() {
        let config = inference_config(&InferenceParams::classification());
        assert_eq!(config.max_tokens(), Some(5));
        assert_eq!(config.temperature(), Some(0.0));
        assert_eq!(config.top_p(), Some(1.0));
    }

    #[test]
    fn inference_config_for_generation() {
        let config = inference_config(&InferenceParams::generation());
        assert_eq!(config.max_tokens(), Some(4096));
        assert_eq!(config.temperature(), Some(0.7));
        assert_eq!(config.top_p(), Some(0.9));
    }

    #[test]
    fn inference_config_without_top_p() {
        let params = InferenceParams {
            top_p: None,
            ..InferenceParams::generation()
        };
        assert_eq!(inference_config(&params).top_p(), None);
    }

    #[test]
    fn extract_text_joins_text_blocks() {
        let output = output_with(vec![
            ContentBlock::Text("1".into()),
            ContentBlock::Text("\n".into()),
        ]);
        assert_eq!(extract_text(Some(&output)).unwrap(), "1\n");
    }

    #[test]
    fn extract_text_missing_output_is_error() {
        let err = extract_text(None).unwrap_err();
        assert!(err.to_string().contains("no output"), "got: {err}");
    }

    #[test]
    fn extract_text_without_content_is_error() {
        let output = output_with(vec![]);
        let err = extract_text(Some(&output)).unwrap_err();
        assert!(
            err.to_string().contains("no text content"),
            "got: {err}"
        );
    }

    #[test]
    fn extract_text_keeps_empty_text_block() {
        let output = output_with(vec![ContentBlock::Text(String::new())]);
        assert_eq!(extract_text(Some(&output)).unwrap(), "");
    }

    #[test]
    fn extract_token_usage_present() {
        let usage = aws_sdk_bedrockruntime::types::TokenUsage::builder()
            .input_tokens(150)
            .output_tokens(42)
            .total_tokens(192)
            .build()
            .unwrap();
        assert_eq!(extract_token_usage(Some(&usage)), TokenUsage::new(150, 42));
    }

    #[test]
    fn extract_token_usage_none() {
        assert_eq!(extract_token_usage(None), TokenUsage::default());
    }

    #[test]
    fn extract_token_usage_negative_clamps_to_zero() {
        let usage = aws_sdk_bedrockruntime::types::TokenUsage::builder()
            .input_tokens(-1)
            .output_tokens(-5)
            .total_tokens(0)
            .build()
            .unwrap();
        assert_eq!(extract_token_usage(Some(&usage)), TokenUsage::default());
    }

    #[tokio::test]
    async fn new_uses_configured_region() {
        let config = BedrockConfig {
            region: "ap-northeast-1".into(),
            profile: None,
        };
        let provider = BedrockProvider::new(&config).await;
        assert_eq!(provider.region(), "ap-northeast-1");
        assert_eq!(provider.name(), "bedrock");
    }
}
