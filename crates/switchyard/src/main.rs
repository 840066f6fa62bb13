// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Switchyard - a two-stage prompt router.
//!
//! A small classifier model decides whether each prompt needs a compact or a
//! capable generator; the chosen generator answers it.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod batch;
mod logging;
mod prompts;
mod provider;
mod shell;
mod transcript;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use switchyard_config::SwitchyardConfig;
use switchyard_core::SwitchyardError;
use switchyard_router::PromptRouter;
use tracing::{info, warn};

use crate::transcript::TranscriptRecorder;

/// Switchyard - route each prompt to a compact or capable model.
#[derive(Parser, Debug)]
#[command(name = "switchyard", version, about, long_about = None)]
struct Cli {
    /// Configuration file to load instead of the standard locations.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Route every prompt in the prompt file, in order.
    Batch {
        /// Prompt file (TOML, `prompts = [...]`). Defaults to `batch.prompts_file`.
        #[arg(long, value_name = "FILE")]
        prompts: Option<PathBuf>,
        /// Process only the prompt at this zero-based index.
        #[arg(long)]
        index: Option<usize>,
        /// Skip writing transcripts.
        #[arg(long)]
        no_transcript: bool,
    },
    /// Launch an interactive prompt loop.
    Shell,
    /// Route a single prompt given on the command line.
    Ask {
        prompt: String,
        /// Skip writing a transcript.
        #[arg(long)]
        no_transcript: bool,
    },
    /// Print the effective configuration.
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            switchyard_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    logging::init_tracing(&config.general.log_level);
    switchyard_config::warn_on_model_mismatch(&config);

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red());
            ExitCode::FAILURE
        }
    }
}

fn load_config(
    path: Option<&Path>,
) -> Result<SwitchyardConfig, Vec<switchyard_config::ConfigError>> {
    match path {
        Some(path) => switchyard_config::load_and_validate_path(path),
        None => switchyard_config::load_and_validate(),
    }
}

async fn run(command: Commands, config: &SwitchyardConfig) -> Result<(), SwitchyardError> {
    match command {
        Commands::Config => {
            let rendered = config
                .to_redacted_toml()
                .map_err(|e| SwitchyardError::Internal(format!("failed to render config: {e}")))?;
            print!("{rendered}");
            Ok(())
        }
        Commands::Batch {
            prompts: prompt_file,
            index,
            no_transcript,
        } => {
            let path = prompt_file.unwrap_or_else(|| PathBuf::from(&config.batch.prompts_file));
            let mut queue = prompts::load_prompts(&path).await?;
            info!(count = queue.len(), path = %path.display(), "prompts loaded");
            if let Some(index) = index {
                let chosen = prompts::select_index(index, queue.len());
                queue = vec![queue.swap_remove(chosen)];
            }

            let router = build_router(config).await?;
            let recorder = transcript_recorder(config, no_transcript);
            let summary = batch::run_batch(
                &router,
                &queue,
                recorder.as_ref(),
                &mut std::io::stdout().lock(),
            )
            .await
            .map_err(output_error)?;

            info!(
                processed = summary.processed,
                failed_calls = summary.failed_calls,
                transcripts = summary.transcripts_written,
                "batch complete"
            );
            if summary.transcript_errors > 0 {
                warn!(
                    count = summary.transcript_errors,
                    "some transcripts could not be written"
                );
            }
            Ok(())
        }
        Commands::Ask {
            prompt,
            no_transcript,
        } => {
            let router = build_router(config).await?;
            let recorder = transcript_recorder(config, no_transcript);
            batch::run_single(
                &router,
                &prompt,
                recorder.as_ref(),
                &mut std::io::stdout().lock(),
            )
            .await
            .map_err(output_error)?;
            Ok(())
        }
        Commands::Shell => {
            let router = build_router(config).await?;
            let mut input = shell::ReadlineInput::new()?;
            shell::run_shell(&router, &mut input, &mut std::io::stdout()).await?;
            Ok(())
        }
    }
}

async fn build_router(config: &SwitchyardConfig) -> Result<PromptRouter, SwitchyardError> {
    let provider = provider::build_provider(config).await?;
    info!(
        backend = provider.name(),
        classifier = config.routing.classifier_model.as_str(),
        "router ready"
    );
    Ok(PromptRouter::from_config(provider, &config.routing))
}

fn transcript_recorder(config: &SwitchyardConfig, disabled: bool) -> Option<TranscriptRecorder> {
    (config.transcript.enabled && !disabled)
        .then(|| TranscriptRecorder::new(&config.transcript.directory))
}

fn output_error(e: std::io::Error) -> SwitchyardError {
    SwitchyardError::Internal(format!("failed to write output: {e}"))
}
