// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Markdown transcripts of completed routing cycles.
//!
//! One file per cycle, named after the local time the cycle was recorded:
//! `result_<YYYYMMDD_HHMMSS>.md`, with a `_<n>` suffix when that name is
//! already taken.

use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local};
use switchyard_core::{SwitchyardError, TokenUsage};
use switchyard_router::PromptCycle;
use tokio::io::AsyncWriteExt;
use tracing::info;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Render the transcript body for `cycle`.
///
/// Sections always appear in the same order: input prompt, classifier
/// analysis, classifier output, classification result, generation result,
/// final response.
pub fn render_transcript(cycle: &PromptCycle, timestamp: &str) -> String {
    let classification = &cycle.classification;
    let generation = &cycle.generation;
    let label = &generation.model.label;

    let classifier_output = if classification.failure().is_some() {
        "(error)"
    } else {
        classification.raw_reply.trim()
    };

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "# Prompt Routing Result - {timestamp}\n\
         \n\
         ## Input Prompt\n\
         \n\
         ```\n{prompt}\n```\n\
         \n\
         ## Classifier Analysis\n\
         \n\
         - **Selected Model**: {label}\n\
         {classifier_stats}\
         \n\
         ### Classifier Output\n\
         \n\
         ```\n{classifier_output} (0=Haiku, 1=Sonnet)\n```\n\
         \n\
         ### Classification Result\n\
         \n\
         ```\n{choice}\n```\n\
         \n\
         ## Generation Result\n\
         \n\
         - **Model**: {label}\n\
         {generation_stats}\
         \n\
         ## Final Response\n\
         \n\
         ```\n{response}\n```\n",
        prompt = cycle.prompt,
        classifier_stats = call_stats(
            classification.elapsed,
            classification.usage,
            classification.failure()
        ),
        choice = classification.route.choice_label(),
        generation_stats = call_stats(generation.elapsed, generation.usage, generation.failure()),
        response = generation.response_text,
    );
    out
}

fn call_stats(elapsed: Duration, usage: TokenUsage, error: Option<&str>) -> String {
    format!(
        "- **Elapsed**: {:.2}s\n\
         - **Input Tokens**: {}\n\
         - **Output Tokens**: {}\n\
         - **Total Tokens**: {}\n\
         - **Error**: {}\n",
        elapsed.as_secs_f64(),
        usage.input_tokens,
        usage.output_tokens,
        usage.total(),
        error.unwrap_or("none"),
    )
}

/// Writes one transcript file per cycle into a directory.
#[derive(Debug, Clone)]
pub struct TranscriptRecorder {
    directory: PathBuf,
}

impl TranscriptRecorder {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Record `cycle` stamped with the current local time.
    pub async fn record(&self, cycle: &PromptCycle) -> Result<PathBuf, SwitchyardError> {
        self.record_at(cycle, Local::now()).await
    }

    /// Record `cycle` stamped with `now`. The directory is created if absent.
    pub async fn record_at(
        &self,
        cycle: &PromptCycle,
        now: DateTime<Local>,
    ) -> Result<PathBuf, SwitchyardError> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|source| SwitchyardError::Transcript {
                path: self.directory.clone(),
                source,
            })?;

        let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
        let body = render_transcript(cycle, &timestamp);

        let (path, mut file) = self.create_fresh(&timestamp).await?;
        file.write_all(body.as_bytes())
            .await
            .map_err(|source| SwitchyardError::Transcript {
                path: path.clone(),
                source,
            })?;
        file.flush().await.map_err(|source| SwitchyardError::Transcript {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "transcript written");
        Ok(path)
    }

    /// Create a file that did not exist before, adding `_<n>` on collision.
    async fn create_fresh(
        &self,
        timestamp: &str,
    ) -> Result<(PathBuf, tokio::fs::File), SwitchyardError> {
        let mut attempt = 0u32;
        loop {
            let name = if attempt == 0 {
                format!("result_{timestamp}.md")
            } else {
                format!("result_{timestamp}_{attempt}.md")
            };
            let path = self.directory.join(name);
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(source) => return Err(SwitchyardError::Transcript { path, source }),
            }
        }
    }
}
