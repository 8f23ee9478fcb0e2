// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema: a namespace of uniquely named, typed database objects
//!
//! Structural changes (add, rename, remove) are expected to run while the
//! caller holds the database's coordinating DDL lock
//! (`Database::lock_meta`); the schema itself only guarantees that every
//! single call is atomic and that generated names never collide.

use super::error::{CatalogError, CatalogResult};
use super::object::{ObjectType, SchemaObject, SchemaObjectRef, SchemaRef};
use super::objects::{Constant, CreateTableData, FunctionAlias, Index, Sequence, Table};
use super::principal::PrincipalRef;
use super::registry::{SchemaState, TypedRegistry};
use super::teardown;
use super::traits::CatalogHost;
use super::unique_name::{NameReservation, ReservationSet};
use crate::session::Session;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Physical location of a schema's own metadata in a sharded deployment.
/// The catalog stores it but never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataNode {
    pub shard_name: String,
    pub object_name: String,
}

impl MetadataNode {
    pub fn new(shard_name: impl Into<String>, object_name: impl Into<String>) -> Self {
        Self {
            shard_name: shard_name.into(),
            object_name: object_name.into(),
        }
    }
}

pub struct Schema {
    id: u32,
    name: String,
    schema_ref: SchemaRef,
    /// System schemas can never be dropped
    system: bool,
    registry: RwLock<TypedRegistry>,
    reservations: ReservationSet,
    owner: RwLock<Option<PrincipalRef>>,
    metadata_node: RwLock<Option<MetadataNode>>,
}

impl Schema {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        owner: Option<PrincipalRef>,
        system: bool,
        ignore_case: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            schema_ref: SchemaRef::allocate(id),
            system,
            registry: RwLock::new(TypedRegistry::new(ignore_case)),
            reservations: ReservationSet::new(ignore_case),
            owner: RwLock::new(owner),
            metadata_node: RwLock::new(None),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity token objects use to refer back to this schema
    pub fn schema_ref(&self) -> SchemaRef {
        self.schema_ref
    }

    pub fn is_system(&self) -> bool {
        self.system
    }

    /// Check if this schema can be dropped. System schemas can not be dropped.
    pub fn can_drop(&self) -> bool {
        !self.system
    }

    /// Owner of the schema, `None` after teardown
    pub fn owner(&self) -> Option<PrincipalRef> {
        self.owner.read().clone()
    }

    pub fn is_owned_by(&self, principal: &PrincipalRef) -> bool {
        self.owner.read().as_ref() == Some(principal)
    }

    pub fn metadata_node(&self) -> Option<MetadataNode> {
        self.metadata_node.read().clone()
    }

    pub fn set_metadata_node(&self, node: Option<MetadataNode>) {
        *self.metadata_node.write() = node;
    }

    pub fn state(&self) -> SchemaState {
        self.registry.read().state()
    }

    pub fn is_valid(&self) -> bool {
        self.state() == SchemaState::Active
    }

    fn read_active(&self) -> CatalogResult<RwLockReadGuard<'_, TypedRegistry>> {
        let registry = self.registry.read();
        registry.ensure_active(&self.name)?;
        Ok(registry)
    }

    fn write_active(&self) -> CatalogResult<RwLockWriteGuard<'_, TypedRegistry>> {
        let registry = self.registry.write();
        registry.ensure_active(&self.name)?;
        Ok(registry)
    }

    /// Add an object to this schema
    ///
    /// The object must refer back to this schema and its name must be free
    /// within its type; violating either is an internal error. A
    /// reservation on the name is released.
    pub fn add(&self, obj: SchemaObjectRef) -> CatalogResult<()> {
        let object_type = obj.object_type();
        let mut registry = self.write_active()?;
        let name = registry.add(self.schema_ref, obj)?;
        self.free_unique_name(&name);
        drop(registry);
        log::debug!("schema {}: added {} {}", self.name, object_type, name);
        Ok(())
    }

    /// Rename an object, running its rename hook first
    pub fn rename(&self, obj: &SchemaObjectRef, new_name: &str) -> CatalogResult<()> {
        let mut registry = self.write_active()?;
        let old_name = registry.rename(obj, new_name)?;
        self.free_unique_name(&old_name);
        self.free_unique_name(new_name);
        drop(registry);
        log::debug!(
            "schema {}: renamed {} {} to {}",
            self.name,
            obj.object_type(),
            old_name,
            new_name
        );
        Ok(())
    }

    /// Remove an object from this schema
    pub fn remove(&self, obj: &SchemaObjectRef) -> CatalogResult<()> {
        let mut registry = self.write_active()?;
        let name = registry.remove(obj)?;
        self.free_unique_name(&name);
        drop(registry);
        log::debug!("schema {}: removed {} {}", self.name, obj.object_type(), name);
        Ok(())
    }

    /// True when `obj` itself is registered here
    pub fn contains(&self, obj: &SchemaObjectRef) -> CatalogResult<bool> {
        Ok(self.read_active()?.contains(obj))
    }

    pub fn find_object(
        &self,
        object_type: ObjectType,
        name: &str,
    ) -> CatalogResult<Option<SchemaObjectRef>> {
        Ok(self.read_active()?.get(object_type, name).cloned())
    }

    pub fn get_object(&self, object_type: ObjectType, name: &str) -> CatalogResult<SchemaObjectRef> {
        self.find_object(object_type, name)?
            .ok_or_else(|| CatalogError::not_found(object_type, name))
    }

    /// Try to find a table or view with this name. Local temporary tables
    /// of `session` are also returned.
    pub fn find_table_or_view(
        &self,
        session: Option<&Session>,
        name: &str,
    ) -> CatalogResult<Option<Arc<Table>>> {
        let table = self
            .find_object(ObjectType::TableOrView, name)?
            .and_then(|obj| obj.as_table().cloned());
        Ok(table.or_else(|| session.and_then(|s| s.find_local_temp_table(name))))
    }

    /// Try to find an index with this name, falling back to the local
    /// temporary indexes of `session`
    pub fn find_index(&self, session: Option<&Session>, name: &str) -> CatalogResult<Option<Arc<Index>>> {
        let index = self
            .find_object(ObjectType::Index, name)?
            .and_then(|obj| obj.as_index().cloned());
        Ok(index.or_else(|| session.and_then(|s| s.find_local_temp_table_index(name))))
    }

    pub fn find_sequence(&self, name: &str) -> CatalogResult<Option<Arc<Sequence>>> {
        Ok(self
            .find_object(ObjectType::Sequence, name)?
            .and_then(|obj| obj.as_sequence().cloned()))
    }

    pub fn find_constant(&self, name: &str) -> CatalogResult<Option<Arc<Constant>>> {
        Ok(self
            .find_object(ObjectType::Constant, name)?
            .and_then(|obj| obj.as_constant().cloned()))
    }

    pub fn find_function(&self, name: &str) -> CatalogResult<Option<Arc<FunctionAlias>>> {
        Ok(self
            .find_object(ObjectType::FunctionAlias, name)?
            .and_then(|obj| obj.as_function().cloned()))
    }

    /// Like [`Schema::find_table_or_view`] but fails with `NotFound`
    pub fn get_table_or_view(&self, session: Option<&Session>, name: &str) -> CatalogResult<Arc<Table>> {
        self.find_table_or_view(session, name)?
            .ok_or_else(|| CatalogError::not_found(ObjectType::TableOrView, name))
    }

    pub fn get_index(&self, name: &str) -> CatalogResult<Arc<Index>> {
        self.find_index(None, name)?
            .ok_or_else(|| CatalogError::not_found(ObjectType::Index, name))
    }

    pub fn get_sequence(&self, name: &str) -> CatalogResult<Arc<Sequence>> {
        self.find_sequence(name)?
            .ok_or_else(|| CatalogError::not_found(ObjectType::Sequence, name))
    }

    pub fn get_constant(&self, name: &str) -> CatalogResult<Arc<Constant>> {
        self.find_constant(name)?
            .ok_or_else(|| CatalogError::not_found(ObjectType::Constant, name))
    }

    pub fn get_function(&self, name: &str) -> CatalogResult<Arc<FunctionAlias>> {
        self.find_function(name)?
            .ok_or_else(|| CatalogError::not_found(ObjectType::FunctionAlias, name))
    }

    /// Snapshot of all objects
    pub fn get_all(&self) -> CatalogResult<Vec<SchemaObjectRef>> {
        Ok(self.read_active()?.all())
    }

    /// Snapshot of all objects of one type
    pub fn get_all_of(&self, object_type: ObjectType) -> CatalogResult<Vec<SchemaObjectRef>> {
        Ok(self.read_active()?.map(object_type).values())
    }

    /// Snapshot of all tables and views, consistent with concurrent drops
    pub fn get_all_tables_and_views(&self) -> CatalogResult<Vec<Arc<Table>>> {
        let registry = self.read_active()?;
        Ok(registry
            .map(ObjectType::TableOrView)
            .iter()
            .filter_map(|obj| obj.as_table().cloned())
            .collect())
    }

    /// Persistent table with the given name, if any. Session-local tables
    /// are not considered.
    pub fn get_table_or_view_by_name(&self, name: &str) -> CatalogResult<Option<Arc<Table>>> {
        let registry = self.read_active()?;
        Ok(registry
            .get(ObjectType::TableOrView, name)
            .and_then(|obj| obj.as_table().cloned()))
    }

    pub(crate) fn first_of(&self, object_type: ObjectType) -> CatalogResult<Option<SchemaObjectRef>> {
        Ok(self.read_active()?.map(object_type).first())
    }

    /// Release a unique object name
    pub fn free_unique_name(&self, name: &str) {
        self.reservations.free(name);
    }

    pub fn is_name_reserved(&self, name: &str) -> bool {
        self.reservations.is_reserved(name)
    }

    /// Reserve a name derived from `base_name` that is free in the
    /// `object_type` name space of this schema
    pub fn unique_name(
        &self,
        base_name: &str,
        object_type: ObjectType,
        prefix: &str,
    ) -> CatalogResult<NameReservation<'_>> {
        let registry = self.read_active()?;
        let live = registry.map(object_type);
        Ok(self
            .reservations
            .reserve_unique(base_name, prefix, |candidate| live.contains_key(candidate)))
    }

    /// Create a unique index name for `table`
    ///
    /// Indexes of a local temporary table live in the session's own name
    /// space, so the probe runs against that instead of this schema.
    pub fn unique_index_name(
        &self,
        session: Option<&Session>,
        table: &Table,
        prefix: &str,
    ) -> CatalogResult<NameReservation<'_>> {
        if table.is_temporary() && !table.is_global_temporary() {
            let session = session.ok_or_else(|| {
                CatalogError::internal(format!(
                    "local temporary table {} needs a session",
                    table.name()
                ))
            })?;
            let _registry = self.read_active()?;
            return Ok(self.reservations.reserve_unique(&table.name(), prefix, |candidate| {
                session.has_local_temp_index(candidate)
            }));
        }
        self.unique_name(&table.name(), ObjectType::Index, prefix)
    }

    /// Tables are created by the execution layer, never by the catalog
    pub fn create_table(&self, data: &CreateTableData) -> CatalogResult<Arc<Table>> {
        Err(CatalogError::Unsupported(format!(
            "create table {}.{} at the catalog layer",
            self.name, data.table_name
        )))
    }

    /// Drop every object of this schema in dependency order, then
    /// invalidate the schema
    pub fn remove_children_and_resources(
        &self,
        host: &dyn CatalogHost,
        session: Option<&Session>,
    ) -> CatalogResult<()> {
        teardown::remove_children_and_resources(self, host, session)
    }

    pub(crate) fn invalidate(&self) {
        self.registry.write().invalidate();
        *self.owner.write() = None;
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.registry.read().is_empty()
    }
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("system", &self.system)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::objects::{IndexKind, TemporaryScope};
    use crate::catalog::unique_name::name_digest;

    fn schema() -> Schema {
        Schema::new(1, "APP", None, false, false)
    }

    #[test]
    fn test_add_table_and_index() {
        let schema = schema();
        let table = Arc::new(Table::new(10, schema.schema_ref(), "T1"));
        let index = Index::new(11, schema.schema_ref(), "I1", &table, vec![], IndexKind::NonUnique);
        schema.add(table.clone().into()).unwrap();
        schema.add(index.into()).unwrap();

        let all = schema.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].object_type(), ObjectType::TableOrView);
        assert!(schema.can_drop());
        assert!(Arc::ptr_eq(&schema.get_table_or_view(None, "T1").unwrap(), &table));
    }

    #[test]
    fn test_system_schema_cannot_drop() {
        let schema = Schema::new(0, "INFORMATION_SCHEMA", None, true, false);
        assert!(!schema.can_drop());
        assert!(schema.is_system());
    }

    #[test]
    fn test_get_reports_missing_name() {
        let schema = schema();
        assert_eq!(
            schema.get_table_or_view(None, "missing").unwrap_err(),
            CatalogError::NotFound {
                object_type: ObjectType::TableOrView,
                name: "missing".into()
            }
        );
        assert!(schema.find_sequence("missing").unwrap().is_none());
        assert!(schema.get_constant("missing").is_err());
    }

    #[test]
    fn test_add_commits_reservation() {
        let schema = schema();
        let table = Table::new(10, schema.schema_ref(), "T1");
        let reservation = schema.unique_index_name(None, &table, "IDX_").unwrap();
        let name = reservation.name().to_string();
        assert!(schema.is_name_reserved(&name));

        let index = Index::new(11, schema.schema_ref(), &name, &table, vec![], IndexKind::Unique);
        schema.add(index.into()).unwrap();
        assert!(!schema.is_name_reserved(&name));
        drop(reservation);
        assert!(schema.get_index(&name).is_ok());
    }

    #[test]
    fn test_committed_name_is_never_seen_reserved() {
        let schema = schema();
        let table = Table::new(10, schema.schema_ref(), "T1");
        let done = std::sync::atomic::AtomicBool::new(false);

        std::thread::scope(|s| {
            s.spawn(|| {
                for id in 0..2_000 {
                    let reservation = schema.unique_index_name(None, &table, "IDX_").unwrap();
                    let index: SchemaObjectRef =
                        Index::new(id, schema.schema_ref(), reservation.name(), &table, vec![], IndexKind::NonUnique)
                            .into();
                    schema.add(index.clone()).unwrap();
                    drop(reservation);
                    schema.remove(&index).unwrap();
                }
                done.store(true, std::sync::atomic::Ordering::SeqCst);
            });

            while !done.load(std::sync::atomic::Ordering::SeqCst) {
                let registry = schema.registry.read();
                for index in registry.map(ObjectType::Index).iter() {
                    assert!(
                        !schema.is_name_reserved(&index.name()),
                        "{} is both live and reserved",
                        index.name()
                    );
                }
            }
        });
    }

    #[test]
    fn test_unique_name_skips_live_objects() {
        let schema = schema();
        let table = Table::new(10, schema.schema_ref(), "T1");
        let digest = name_digest("T1");
        let taken = format!("IDX_{}", &digest[..1]);
        schema
            .add(Index::new(11, schema.schema_ref(), &taken, &table, vec![], IndexKind::NonUnique).into())
            .unwrap();

        let reservation = schema.unique_index_name(None, &table, "IDX_").unwrap();
        assert_ne!(reservation.name(), taken);
    }

    #[test]
    fn test_local_temp_index_name_needs_session() {
        let schema = schema();
        let table = Table::new(10, schema.schema_ref(), "TMP").with_scope(TemporaryScope::LocalTemporary);
        assert!(schema.unique_index_name(None, &table, "IDX_").unwrap_err().is_internal());
    }

    #[test]
    fn test_create_table_is_unsupported() {
        let schema = schema();
        let data = CreateTableData {
            schema: "APP".into(),
            table_name: "T".into(),
            ..Default::default()
        };
        assert!(matches!(schema.create_table(&data), Err(CatalogError::Unsupported(_))));
    }

    #[test]
    fn test_invalid_schema_rejects_calls() {
        let schema = schema();
        let table: SchemaObjectRef = Table::new(10, schema.schema_ref(), "T1").into();
        schema.invalidate();

        let invalid = CatalogError::SchemaInvalid("APP".into());
        assert_eq!(schema.add(table.clone()).unwrap_err(), invalid);
        assert_eq!(schema.find_table_or_view(None, "T1").unwrap_err(), invalid);
        assert_eq!(schema.get_all().unwrap_err(), invalid);
        assert!(schema.unique_name("T1", ObjectType::Index, "IDX_").is_err());
        assert!(!schema.is_valid());
    }

    #[test]
    fn test_metadata_node_round_trip() {
        let schema = schema();
        assert!(schema.metadata_node().is_none());
        schema.set_metadata_node(Some(MetadataNode::new("shard0", "APP_META")));
        assert_eq!(schema.metadata_node().unwrap().shard_name, "shard0");
    }

    #[test]
    fn test_rename_releases_old_and_new_reservations() {
        let schema = schema();
        let seq: SchemaObjectRef = Sequence::new(5, schema.schema_ref(), "S1").into();
        schema.add(seq.clone()).unwrap();

        let reservation = schema.unique_name("S1", ObjectType::Sequence, "SEQ_").unwrap();
        let target = reservation.name().to_string();
        schema.rename(&seq, &target).unwrap();
        assert!(!schema.is_name_reserved(&target));
        assert_eq!(seq.as_object().name(), target);
        assert!(schema.find_sequence("S1").unwrap().is_none());
    }
}
