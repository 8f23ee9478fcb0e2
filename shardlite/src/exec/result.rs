// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement execution results

use serde::{Deserialize, Serialize};

/// Outcome of one executed statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    /// Number of catalog entities created, dropped or renamed
    pub affected: usize,
    /// Human readable summary
    pub message: String,
}

impl ExecutionOutcome {
    pub fn new(message: impl Into<String>, affected: usize) -> Self {
        Self {
            affected,
            message: message.into(),
        }
    }
}
