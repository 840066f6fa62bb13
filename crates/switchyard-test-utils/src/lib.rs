// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Switchyard integration tests.
//!
//! Provides a scripted provider and a router harness for fast,
//! deterministic, CI-runnable tests without cloud credentials.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock model provider with scripted replies and request capture
//! - [`TestHarness`] - A [`PromptRouter`](switchyard_router::PromptRouter) wired to a `MockProvider`

pub mod harness;
pub mod mock_provider;

pub use harness::TestHarness;
pub use mock_provider::{MockProvider, MockReply};
