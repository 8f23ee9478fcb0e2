// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Session management
//!
//! - Per-connection session context with local temporary tables and indexes
//! - Session registry keyed by session id

pub mod manager;
pub mod models;

pub use manager::SessionManager;
pub use models::Session;
