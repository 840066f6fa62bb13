// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for hosted model endpoints (Bedrock, Anthropic, mocks).

use async_trait::async_trait;

use crate::error::SwitchyardError;
use crate::types::{ProviderRequest, ProviderResponse};

/// Adapter for a hosted conversational model endpoint.
///
/// Implementations send exactly one request per call. They must not retry:
/// a call either completes or returns an error.
#[async_trait]
pub trait ProviderAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter (e.g. "bedrock").
    fn name(&self) -> &str;

    /// Sends a single-turn completion request and returns the full response.
    async fn complete(&self, request: ProviderRequest)
    -> Result<ProviderResponse, SwitchyardError>;
}
