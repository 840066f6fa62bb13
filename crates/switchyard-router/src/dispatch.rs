// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation dispatch: forward the prompt to the model chosen by the route.

use std::sync::Arc;
use std::time::{Duration, Instant};

use switchyard_config::model::RoutingConfig;
use switchyard_core::{InferenceParams, ProviderAdapter, ProviderRequest, TokenUsage};
use tracing::{debug, warn};

use crate::classifier::Route;

/// A generator model: backend identifier plus the name shown to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSlot {
    pub id: String,
    pub label: String,
}

/// The two generators, one per route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteModels {
    pub compact: ModelSlot,
    pub capable: ModelSlot,
}

impl RouteModels {
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            compact: ModelSlot {
                id: config.compact_model.clone(),
                label: config.compact_label.clone(),
            },
            capable: ModelSlot {
                id: config.capable_model.clone(),
                label: config.capable_label.clone(),
            },
        }
    }

    /// The generator serving `route`.
    pub fn slot_for(&self, route: Route) -> &ModelSlot {
        match route {
            Route::Simple => &self.compact,
            Route::Complex => &self.capable,
        }
    }
}

/// Whether the generation call produced the response text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallStatus {
    Completed,
    /// The call failed; `response_text` describes the error instead.
    Failed { error: String },
}

/// Result of one generation call.
///
/// `response_text` is the model's reply, or the error description when the
/// call failed. Adapters reject responses without any text content, so a
/// completed call only carries empty text when the model replied with it.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub response_text: String,
    /// Generator that handled the prompt.
    pub model: ModelSlot,
    pub status: CallStatus,
    /// Zero when the call failed.
    pub usage: TokenUsage,
    pub elapsed: Duration,
}

impl GenerationOutcome {
    pub fn failure(&self) -> Option<&str> {
        match &self.status {
            CallStatus::Failed { error } => Some(error),
            CallStatus::Completed => None,
        }
    }
}

/// Sends prompts to the compact or capable generator.
pub struct ModelDispatcher {
    provider: Arc<dyn ProviderAdapter>,
    models: RouteModels,
}

impl ModelDispatcher {
    pub fn new(provider: Arc<dyn ProviderAdapter>, models: RouteModels) -> Self {
        Self { provider, models }
    }

    pub fn models(&self) -> &RouteModels {
        &self.models
    }

    /// Generate a response for `prompt` with the generator serving `route`.
    ///
    /// Makes exactly one call. A failed call is not retried and does not fall
    /// over to the other generator; the outcome carries an error description
    /// as its response text.
    pub async fn generate(&self, prompt: &str, route: Route) -> GenerationOutcome {
        let slot = self.models.slot_for(route).clone();
        let request = ProviderRequest {
            model: slot.id.clone(),
            prompt: prompt.to_string(),
            params: InferenceParams::generation(),
        };

        let started = Instant::now();
        let result = self.provider.complete(request).await;
        let elapsed = started.elapsed();

        match result {
            Ok(response) => {
                debug!(
                    %route,
                    model = slot.id.as_str(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "generation complete"
                );
                GenerationOutcome {
                    response_text: response.content,
                    model: slot,
                    status: CallStatus::Completed,
                    usage: response.usage,
                    elapsed,
                }
            }
            Err(e) => {
                warn!(model = slot.id.as_str(), error = %e, "generation call failed");
                let error = e.to_string();
                GenerationOutcome {
                    response_text: format!("An error occurred: {error}"),
                    model: slot,
                    status: CallStatus::Failed { error },
                    usage: TokenUsage::default(),
                    elapsed,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_config() {
        let models = RouteModels::from_config(&RoutingConfig::default());
        assert!(models.slot_for(Route::Simple).id.contains("haiku"));
        assert!(models.slot_for(Route::Complex).id.contains("sonnet"));
        assert_eq!(models.slot_for(Route::Simple).label, "Claude 3.5 Haiku");
        assert_eq!(models.slot_for(Route::Complex).label, "Claude 3.7 Sonnet");
    }

    #[test]
    fn failure_accessor() {
        let outcome = GenerationOutcome {
            response_text: "An error occurred: x".into(),
            model: ModelSlot {
                id: "m".into(),
                label: "M".into(),
            },
            status: CallStatus::Failed { error: "x".into() },
            usage: TokenUsage::default(),
            elapsed: Duration::ZERO,
        };
        assert_eq!(outcome.failure(), Some("x"));
    }
}
