// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema catalog
//!
//! The catalog keeps, per schema, five independent name spaces of typed
//! objects (tables and views, indexes, sequences, constants, function
//! aliases) and guarantees:
//! - unique names per (schema, object type)
//! - collision-free implicit names under concurrent callers
//! - dependency-ordered teardown of a whole schema
//!
//! [`Database`] is the single writer path; DDL executors go through it.

pub mod database;
pub mod error;
pub mod object;
pub mod objects;
pub mod principal;
pub mod registry;
pub mod schema;
pub mod string_map;
mod teardown;
pub mod traits;
pub mod unique_name;

pub use database::Database;
pub use error::{CatalogError, CatalogResult};
pub use object::{ObjectBase, ObjectType, SchemaObject, SchemaObjectRef, SchemaRef};
pub use objects::{
    Column, Constant, CreateTableData, FunctionAlias, Index, IndexKind, Sequence, Table, TableKind,
    TemporaryScope,
};
pub use principal::{PrincipalRef, User};
pub use registry::SchemaState;
pub use schema::{MetadataNode, Schema};
pub use string_map::StringMap;
pub use traits::CatalogHost;
pub use unique_name::{name_digest, NameReservation, ReservationSet};
