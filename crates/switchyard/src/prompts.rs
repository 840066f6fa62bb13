// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batch prompt list loading.
//!
//! A prompt file is TOML with a single `prompts` array. A missing file is not
//! an error: the built-in pair is used instead, with a warning.

use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use switchyard_core::SwitchyardError;
use tracing::warn;

/// Prompts used when no prompt file exists.
pub const BUILTIN_PROMPTS: [&str; 2] = [
    "こんにちは",
    "量子コンピューティングについて詳しく説明してください。",
];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PromptFile {
    prompts: Vec<String>,
}

/// Load prompts from `path`, falling back to [`BUILTIN_PROMPTS`] if it does not exist.
pub async fn load_prompts(path: &Path) -> Result<Vec<String>, SwitchyardError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(
                path = %path.display(),
                "prompt file not found, using built-in prompts"
            );
            return Ok(builtin_prompts());
        }
        Err(e) => {
            return Err(SwitchyardError::PromptSource {
                message: format!("failed to read {}: {e}", path.display()),
            });
        }
    };

    parse_prompts(&content).map_err(|message| SwitchyardError::PromptSource {
        message: format!("{}: {message}", path.display()),
    })
}

fn parse_prompts(content: &str) -> Result<Vec<String>, String> {
    let file: PromptFile = toml::from_str(content).map_err(|e| e.to_string())?;
    if file.prompts.is_empty() {
        return Err("`prompts` must list at least one prompt".to_string());
    }
    Ok(file.prompts)
}

pub fn builtin_prompts() -> Vec<String> {
    BUILTIN_PROMPTS.iter().map(|p| p.to_string()).collect()
}

/// Resolve a single-prompt selection; an out-of-range index uses prompt 0.
pub fn select_index(index: usize, len: usize) -> usize {
    if index < len {
        index
    } else {
        warn!(index, len, "prompt index out of range, using index 0");
        0
    }
}
