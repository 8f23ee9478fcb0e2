// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! ShardLite - schema catalog of a sharded SQL middleware
//!
//! ShardLite presents one logical database on top of many physical shards.
//! This crate holds its metadata core: the per-schema catalog of named
//! objects and the DDL executors that are its only writers.
//!
//! # Features
//!
//! - **Typed Object Registry**: tables and views, indexes, sequences,
//!   constants and function aliases, each in its own name space
//! - **Unique Name Allocation**: implicit names that never collide, even
//!   across concurrent sessions
//! - **Dependency-Ordered Teardown**: schemas are dropped dependents first,
//!   with cycles reported instead of looped on
//! - **Session-Local Objects**: local temporary tables and their indexes
//!
//! # Usage
//!
//! ```ignore
//! use shardlite::{Database, DatabaseConfig, ExecutorFactory, SessionManager, Statement};
//!
//! let db = Database::new(DatabaseConfig::default());
//! let sessions = SessionManager::new(db.ignore_case());
//! let session = sessions.create_session(db.admin().clone());
//! ExecutorFactory::execute(&db, &session, Statement::CreateSchema {
//!     name: "APP".into(),
//!     if_not_exists: false,
//! })?;
//! ```

pub mod catalog;
pub mod config;
pub mod exec;
pub mod session;

pub use catalog::{
    CatalogError, CatalogHost, CatalogResult, Database, ObjectType, Schema, SchemaObject,
    SchemaObjectRef, SchemaState,
};
pub use config::DatabaseConfig;
pub use exec::{ExecutionError, ExecutionOutcome, ExecutorFactory, Statement, StatementExecutor};
pub use session::{Session, SessionManager};

/// ShardLite version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// ShardLite crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
