// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batch and single-prompt drivers.
//!
//! Prompts are processed strictly one after another; each cycle's summary is
//! printed and its transcript written before the next prompt starts.

use std::io::{self, Write};
use std::path::PathBuf;

use colored::Colorize;
use switchyard_router::{PromptCycle, PromptRouter};
use tracing::error;

use crate::transcript::TranscriptRecorder;

const RULE_WIDTH: usize = 40;

/// Counts reported at the end of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    /// Cycles whose classifier call or generation call failed.
    pub failed_calls: usize,
    pub transcripts_written: usize,
    pub transcript_errors: usize,
}

/// Process every prompt in order, printing `===== Prompt i/N =====` markers.
pub async fn run_batch(
    router: &PromptRouter,
    prompts: &[String],
    recorder: Option<&TranscriptRecorder>,
    out: &mut dyn Write,
) -> io::Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    for (i, prompt) in prompts.iter().enumerate() {
        writeln!(out, "\n\n===== Prompt {}/{} =====", i + 1, prompts.len())?;
        process_one(router, prompt, recorder, out, &mut summary).await?;
    }
    Ok(summary)
}

/// Process a single prompt with the same reporting as a batch entry.
pub async fn run_single(
    router: &PromptRouter,
    prompt: &str,
    recorder: Option<&TranscriptRecorder>,
    out: &mut dyn Write,
) -> io::Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    process_one(router, prompt, recorder, out, &mut summary).await?;
    Ok(summary)
}

async fn process_one(
    router: &PromptRouter,
    prompt: &str,
    recorder: Option<&TranscriptRecorder>,
    out: &mut dyn Write,
    summary: &mut BatchSummary,
) -> io::Result<()> {
    writeln!(out, "Prompt: {prompt}")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    let cycle = router.process(prompt).await;
    report_cycle(&cycle, out)?;

    summary.processed += 1;
    if cycle.classification.failure().is_some() || cycle.generation.failure().is_some() {
        summary.failed_calls += 1;
    }

    if let Some(recorder) = recorder {
        match record(recorder, &cycle).await {
            Some(path) => {
                summary.transcripts_written += 1;
                writeln!(out, "Transcript saved to {}", path.display())?;
            }
            None => summary.transcript_errors += 1,
        }
    }

    writeln!(out, "\n----- Response -----")?;
    writeln!(out, "{}", cycle.generation.response_text)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    Ok(())
}

async fn record(recorder: &TranscriptRecorder, cycle: &PromptCycle) -> Option<PathBuf> {
    match recorder.record(cycle).await {
        Ok(path) => Some(path),
        Err(e) => {
            error!(error = %e, "failed to write transcript");
            None
        }
    }
}

/// Print the selected model plus per-call timing and token totals.
fn report_cycle(cycle: &PromptCycle, out: &mut dyn Write) -> io::Result<()> {
    let classification = &cycle.classification;
    let generation = &cycle.generation;

    writeln!(out, "Selected model: {}", generation.model.label.bold())?;
    if classification.is_fallback() {
        writeln!(
            out,
            "{}",
            "(classifier reply unusable, defaulted to the capable model)".dimmed()
        )?;
    }
    writeln!(
        out,
        "Classifier time: {:.2}s",
        classification.elapsed.as_secs_f64()
    )?;
    writeln!(
        out,
        "Classifier tokens: {}",
        classification.usage.total()
    )?;
    writeln!(out, "Generation time: {:.2}s", generation.elapsed.as_secs_f64())?;
    writeln!(out, "Generation tokens: {}", generation.usage.total())?;
    Ok(())
}
