// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement execution
//!
//! The executors here are the only writers of the catalog. Each DDL
//! executor holds the database meta lock for its whole run.

pub mod ddl_stmt;
pub mod error;
pub mod factory;
pub mod result;
pub mod statement;

pub use error::ExecutionError;
pub use factory::{ExecutorFactory, StatementExecutor};
pub use result::ExecutionOutcome;
pub use statement::{
    AddConstraintData, AlterColumnAction, AlterColumnData, ConstraintKind, CreateIndexData, DmlKind,
    Statement, TransactionKind,
};
