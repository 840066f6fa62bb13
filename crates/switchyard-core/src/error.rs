// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Switchyard prompt router.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across Switchyard crates.
///
/// Per-prompt model failures are carried as `Provider` errors up to the
/// router, which folds them into outcome values. The remaining variants only
/// surface at start-up or around transcript I/O.
#[derive(Debug, Error)]
pub enum SwitchyardError {
    /// Configuration errors (missing API key, invalid header value, bad backend).
    #[error("configuration error: {0}")]
    Config(String),

    /// Model provider errors (network failure, API error, malformed response).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failure writing a transcript file.
    #[error("failed to write transcript {}: {source}", path.display())]
    Transcript {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The batch prompt list could not be read or parsed.
    #[error("prompt source error: {message}")]
    PromptSource { message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SwitchyardError {
    /// Convenience constructor for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        SwitchyardError::Provider {
            message: message.into(),
            source: None,
        }
    }
}
