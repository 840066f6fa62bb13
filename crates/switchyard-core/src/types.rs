// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the router and every provider adapter.

use serde::{Deserialize, Serialize};

/// Token usage reported by a model call.
///
/// Failed calls report zero for both counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    /// Sum of input and output tokens.
    pub fn total(&self) -> u32 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

/// Decoding parameters sent with a request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InferenceParams {
    /// Output length cap in tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus-sampling width. `None` leaves the backend default.
    pub top_p: Option<f32>,
}

impl InferenceParams {
    /// Parameters for the classifier call: one deterministic character.
    pub fn classification() -> Self {
        Self {
            max_tokens: 5,
            temperature: 0.0,
            top_p: Some(1.0),
        }
    }

    /// Parameters for the generation call: longer, varied output.
    pub fn generation() -> Self {
        Self {
            max_tokens: 4096,
            temperature: 0.7,
            top_p: Some(0.9),
        }
    }
}

/// A single-turn request to a model provider.
///
/// The request always carries exactly one user-role message whose content
/// is `prompt`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// Model identifier understood by the backend.
    pub model: String,
    /// User message content, forwarded unmodified.
    pub prompt: String,
    /// Decoding parameters.
    pub params: InferenceParams,
}

/// A complete response from a model provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    /// Concatenated text content of the output message.
    pub content: String,
    /// Model that produced the response.
    pub model: String,
    /// Reason generation stopped, if the backend reports one.
    pub stop_reason: Option<String>,
    /// Token usage for the call.
    pub usage: TokenUsage,
}
