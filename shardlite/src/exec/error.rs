// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Execution error types

use crate::catalog::CatalogError;
use thiserror::Error;

/// Execution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Unsupported statement: {0}")]
    Unsupported(String),

    #[error("Invalid statement: {0}")]
    InvalidStatement(String),
}

impl ExecutionError {
    /// The catalog error behind this failure, if any
    pub fn catalog_error(&self) -> Option<&CatalogError> {
        match self {
            ExecutionError::Catalog(err) => Some(err),
            _ => None,
        }
    }
}
