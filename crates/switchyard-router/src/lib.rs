// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classifier-driven model routing for Switchyard.
//!
//! This crate provides:
//! - [`PromptClassifier`]: asks a small model for a 0/1 signal and turns the
//!   reply into a [`Route`], falling back to [`Route::Complex`] on any
//!   ambiguity or failure
//! - [`ModelDispatcher`]: forwards the prompt to the compact or capable model
//!   selected by the route
//! - [`PromptRouter`]: runs one classification then one generation per prompt

pub mod classifier;
pub mod cycle;
pub mod dispatch;

pub use classifier::{
    classification_prompt, parse_reply, ClassificationOutcome, PromptClassifier, Route,
    RouteBasis, FALLBACK_ROUTE,
};
pub use cycle::{PromptCycle, PromptRouter};
pub use dispatch::{CallStatus, GenerationOutcome, ModelDispatcher, ModelSlot, RouteModels};
