// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive shell for the `switchyard shell` subcommand.
//!
//! Reads one prompt per line with readline history, routes it, and prints
//! the chosen model and its response. No transcripts are written here.

use std::io::{self, Write};

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use switchyard_core::SwitchyardError;
use switchyard_router::PromptRouter;
use tracing::debug;

const SEPARATOR_WIDTH: usize = 50;

/// Source of interactive input lines.
pub trait LineReader {
    /// Read one line. `Ok(None)` means end of input (EOF or Ctrl-C).
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, SwitchyardError>;
}

/// [`LineReader`] backed by rustyline, with in-memory history.
pub struct ReadlineInput {
    editor: DefaultEditor,
}

impl ReadlineInput {
    pub fn new() -> Result<Self, SwitchyardError> {
        let editor = DefaultEditor::new()
            .map_err(|e| SwitchyardError::Internal(format!("failed to initialize readline: {e}")))?;
        Ok(Self { editor })
    }
}

impl LineReader for ReadlineInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, SwitchyardError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            // Ctrl+C / Ctrl+D
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(SwitchyardError::Internal(format!("readline failed: {e}"))),
        }
    }
}

/// What a line of shell input asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum ShellInput<'a> {
    Exit,
    Blank,
    Prompt(&'a str),
}

/// Classify a raw input line. Prompts are passed on verbatim.
pub fn parse_input(line: &str) -> ShellInput<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        ShellInput::Blank
    } else if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
        ShellInput::Exit
    } else {
        ShellInput::Prompt(line)
    }
}

/// Run the read-route-print loop until an exit command or end of input.
pub async fn run_shell(
    router: &PromptRouter,
    input: &mut dyn LineReader,
    out: &mut dyn Write,
) -> Result<usize, SwitchyardError> {
    write_banner(out).map_err(output_error)?;

    let prompt_label = format!("\n{} ", "Enter a prompt:".green());
    let mut processed = 0;
    while let Some(line) = input.read_line(&prompt_label)? {
        match parse_input(&line) {
            ShellInput::Exit => break,
            ShellInput::Blank => {
                writeln!(out, "{}", "No prompt entered. Please try again.".yellow())
                    .map_err(output_error)?;
            }
            ShellInput::Prompt(prompt) => {
                writeln!(out, "\n{}\n", "Processing...".dimmed()).map_err(output_error)?;
                let cycle = router.process(prompt).await;
                writeln!(out, "Selected model: {}", cycle.generation.model.label.bold())
                    .map_err(output_error)?;
                writeln!(out, "\nResponse:\n\n{}", cycle.generation.response_text)
                    .map_err(output_error)?;
                writeln!(out, "\n{}", "-".repeat(SEPARATOR_WIDTH)).map_err(output_error)?;
                processed += 1;
            }
        }
    }

    debug!(processed, "shell session finished");
    writeln!(out, "{}", "goodbye".dimmed()).map_err(output_error)?;
    Ok(processed)
}

fn write_banner(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", "switchyard shell".bold().green())?;
    writeln!(
        out,
        "Type {} or {} to finish.",
        "exit".yellow(),
        "quit".yellow()
    )?;
    writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))
}

fn output_error(e: io::Error) -> SwitchyardError {
    SwitchyardError::Internal(format!("failed to write output: {e}"))
}
