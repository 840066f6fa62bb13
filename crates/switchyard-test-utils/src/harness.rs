// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end routing tests.
//!
//! `TestHarness` wires a [`PromptRouter`] to a [`MockProvider`] so a test can
//! script classifier and generator replies, run a prompt, and then inspect
//! every request the router sent.

use std::sync::Arc;

use switchyard_config::model::RoutingConfig;
use switchyard_core::ProviderAdapter;
use switchyard_router::{PromptCycle, PromptRouter};

use crate::mock_provider::{MockProvider, MockReply};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    replies: Vec<MockReply>,
    routing: RoutingConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            replies: Vec::new(),
            routing: RoutingConfig::default(),
        }
    }

    /// Queue scripted replies. Calls consume them in order: classifier
    /// first, then generator, for each prompt.
    pub fn with_replies(mut self, replies: Vec<MockReply>) -> Self {
        self.replies = replies;
        self
    }

    /// Override the routing models and labels.
    pub fn with_routing(mut self, routing: RoutingConfig) -> Self {
        self.routing = routing;
        self
    }

    pub fn build(self) -> TestHarness {
        let mock_provider = Arc::new(MockProvider::with_replies(self.replies));
        let router = PromptRouter::from_config(
            mock_provider.clone() as Arc<dyn ProviderAdapter>,
            &self.routing,
        );
        TestHarness {
            mock_provider,
            router,
            routing: self.routing,
        }
    }
}

/// A router backed by a scripted provider.
pub struct TestHarness {
    /// The mock provider shared by classifier and generators.
    pub mock_provider: Arc<MockProvider>,
    pub router: PromptRouter,
    /// Routing configuration the router was built from.
    pub routing: RoutingConfig,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Run one full routing cycle for `prompt`.
    pub async fn route(&self, prompt: &str) -> PromptCycle {
        self.router.process(prompt).await
    }

    /// Model identifiers of every request sent so far, in order.
    pub async fn requested_models(&self) -> Vec<String> {
        self.mock_provider
            .requests()
            .await
            .into_iter()
            .map(|r| r.model)
            .collect()
    }
}
