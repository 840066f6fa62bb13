// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Switchyard prompt router.
//!
//! This crate provides the error type, the request/response types shared by
//! every model backend, and the [`ProviderAdapter`] trait that the routing
//! policy and generation dispatch are written against. Backends are
//! constructed explicitly and injected, so tests can substitute a fake.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SwitchyardError;
pub use traits::ProviderAdapter;
pub use types::{InferenceParams, ProviderRequest, ProviderResponse, TokenUsage};
