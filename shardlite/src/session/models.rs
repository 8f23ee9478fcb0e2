// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Session model
//!
//! A session is the per-connection context a statement executes in. Besides
//! its identity it owns the local temporary tables (and their indexes),
//! which are visible to this session only and shadow nothing: the schema
//! consults them only when its persistent catalog has no match.

use crate::catalog::string_map::StringMap;
use crate::catalog::{CatalogError, CatalogResult, Index, PrincipalRef, SchemaObject, Table};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A database session
pub struct Session {
    // === Identity Information ===
    /// Unique session identifier
    session_id: String,
    /// User the session runs as
    user: PrincipalRef,

    // === Session State ===
    /// Local temporary tables, by name
    temp_tables: RwLock<StringMap<Arc<Table>>>,
    /// Indexes on local temporary tables, by name
    temp_indexes: RwLock<StringMap<Arc<Index>>>,

    // === Session Lifecycle ===
    /// When the session was created
    created_at: chrono::DateTime<chrono::Utc>,
    /// Whether the session is still open
    active: AtomicBool,
}

impl Session {
    /// Create a new session for `user`
    pub fn new(user: PrincipalRef, ignore_case: bool) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            user,
            temp_tables: RwLock::new(StringMap::new(ignore_case)),
            temp_indexes: RwLock::new(StringMap::new(ignore_case)),
            created_at: chrono::Utc::now(),
            active: AtomicBool::new(true),
        }
    }

    pub fn id(&self) -> &str {
        &self.session_id
    }

    pub fn user(&self) -> &PrincipalRef {
        &self.user
    }

    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    // === Local Temporary Objects ===

    /// Register a local temporary table
    pub fn add_local_temp_table(&self, table: Arc<Table>) -> CatalogResult<()> {
        let name = table.name();
        let mut tables = self.temp_tables.write();
        if tables.contains_key(&name) {
            return Err(CatalogError::AlreadyExists {
                object_type: table.object_type(),
                name,
            });
        }
        tables.insert(&name, table);
        Ok(())
    }

    /// Remove a local temporary table together with its indexes
    pub fn remove_local_temp_table(&self, name: &str) -> Option<Arc<Table>> {
        let table = self.temp_tables.write().remove(name)?;
        let mut indexes = self.temp_indexes.write();
        let owned: Vec<String> = indexes
            .iter()
            .filter(|index| index.table_id() == table.id())
            .map(|index| index.name())
            .collect();
        for index_name in owned {
            if let Some(index) = indexes.remove(&index_name) {
                index.invalidate();
            }
        }
        table.invalidate();
        Some(table)
    }

    pub fn find_local_temp_table(&self, name: &str) -> Option<Arc<Table>> {
        self.temp_tables.read().get(name).cloned()
    }

    pub fn local_temp_tables(&self) -> Vec<Arc<Table>> {
        self.temp_tables.read().values()
    }

    pub fn add_local_temp_table_index(&self, index: Arc<Index>) -> CatalogResult<()> {
        let name = index.name();
        let mut indexes = self.temp_indexes.write();
        if indexes.contains_key(&name) {
            return Err(CatalogError::AlreadyExists {
                object_type: index.object_type(),
                name,
            });
        }
        indexes.insert(&name, index);
        Ok(())
    }

    pub fn remove_local_temp_table_index(&self, name: &str) -> Option<Arc<Index>> {
        let index = self.temp_indexes.write().remove(name)?;
        index.invalidate();
        Some(index)
    }

    pub fn find_local_temp_table_index(&self, name: &str) -> Option<Arc<Index>> {
        self.temp_indexes.read().get(name).cloned()
    }

    /// Indexes on the local temporary table with id `table_id`
    pub fn local_temp_table_indexes(&self, table_id: u32) -> Vec<Arc<Index>> {
        self.temp_indexes
            .read()
            .iter()
            .filter(|index| index.table_id() == table_id)
            .cloned()
            .collect()
    }

    pub fn local_temp_index_names(&self) -> Vec<String> {
        self.temp_indexes.read().iter().map(|index| index.name()).collect()
    }

    pub fn has_local_temp_index(&self, name: &str) -> bool {
        self.temp_indexes.read().contains_key(name)
    }

    /// Close the session, dropping every local temporary object
    pub fn close(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }
        let names: Vec<String> = self.temp_tables.read().iter().map(|t| t.name()).collect();
        for name in &names {
            self.remove_local_temp_table(name);
        }
        log::debug!(
            "session {} closed, dropped {} temporary tables",
            self.session_id,
            names.len()
        );
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("session_id", &self.session_id)
            .field("user", &self.user.name)
            .field("active", &self.is_active())
            .finish()
    }
}
