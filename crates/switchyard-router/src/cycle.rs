// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One routing cycle: classify, then generate.

use std::sync::Arc;

use switchyard_config::model::RoutingConfig;
use switchyard_core::ProviderAdapter;
use tracing::info;

use crate::classifier::{ClassificationOutcome, PromptClassifier};
use crate::dispatch::{GenerationOutcome, ModelDispatcher, RouteModels};

/// Everything produced for one prompt.
#[derive(Debug, Clone)]
pub struct PromptCycle {
    pub prompt: String,
    pub classification: ClassificationOutcome,
    pub generation: GenerationOutcome,
}

/// Drives prompts through classification and generation.
///
/// Holds no per-prompt state; one instance serves every prompt of a run.
pub struct PromptRouter {
    classifier: PromptClassifier,
    dispatcher: ModelDispatcher,
}

impl PromptRouter {
    pub fn new(classifier: PromptClassifier, dispatcher: ModelDispatcher) -> Self {
        Self {
            classifier,
            dispatcher,
        }
    }

    /// Build a router whose classifier and generators share one backend.
    pub fn from_config(provider: Arc<dyn ProviderAdapter>, config: &RoutingConfig) -> Self {
        let classifier = PromptClassifier::new(provider.clone(), config.classifier_model.clone());
        let dispatcher = ModelDispatcher::new(provider, RouteModels::from_config(config));
        Self::new(classifier, dispatcher)
    }

    pub fn models(&self) -> &RouteModels {
        self.dispatcher.models()
    }

    /// Run one cycle. Generation starts only after the route is known.
    pub async fn process(&self, prompt: &str) -> PromptCycle {
        let classification = self.classifier.decide_route(prompt).await;
        let generation = self.dispatcher.generate(prompt, classification.route).await;

        info!(
            route = %classification.route,
            model = generation.model.id.as_str(),
            fallback = classification.is_fallback(),
            generation_failed = generation.failure().is_some(),
            "prompt routed"
        );

        PromptCycle {
            prompt: prompt.to_string(),
            classification,
            generation,
        }
    }
}
