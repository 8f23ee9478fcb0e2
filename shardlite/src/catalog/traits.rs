// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Contract between a schema and the database that owns it

use super::error::CatalogResult;
use super::object::SchemaObjectRef;
use super::objects::Table;
use crate::session::Session;
use std::sync::Arc;

/// Services the owning database provides to schema teardown
///
/// The schema never drops objects on its own: every removal goes through
/// [`CatalogHost::remove_object`], which performs the external side effects
/// and is expected to unregister the object from its schema.
pub trait CatalogHost: Send + Sync {
    /// Tables (in any schema) that still depend on `table`, excluding
    /// `table` itself
    fn dependents_of(&self, table: &Table) -> Vec<Arc<Table>>;

    fn has_dependents(&self, table: &Table) -> bool {
        !self.dependents_of(table).is_empty()
    }

    /// Drop `obj`, removing it from its schema
    fn remove_object(&self, session: Option<&Session>, obj: &SchemaObjectRef) -> CatalogResult<()>;
}
