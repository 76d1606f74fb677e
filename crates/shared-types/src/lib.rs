// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the ISBN resolver
//!
//! This crate provides the provider identifiers and provider orderings that are
//! shared across the crates of the workspace, avoiding circular dependencies.

pub mod order;
pub mod providers;

pub use order::{ProviderOrder, ValidationError};
pub use providers::{ProviderId, ProviderIdParseError};
