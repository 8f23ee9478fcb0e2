// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Database: the owning manager of schemas and users
//!
//! `Database` is the coordinating writer path into the catalog. Every
//! structural change goes through one of its methods, which take the
//! reentrant meta lock for the whole check-then-act sequence. Executors
//! that issue several calls in a row hold [`Database::lock_meta`]
//! themselves.

use super::error::{CatalogError, CatalogResult};
use super::object::{ObjectType, SchemaObject, SchemaObjectRef};
use super::objects::{Index, Table};
use super::principal::{PrincipalRef, User};
use super::schema::Schema;
use super::string_map::StringMap;
use super::traits::CatalogHost;
use crate::config::DatabaseConfig;
use crate::session::Session;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard, RwLock};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

pub struct Database {
    config: DatabaseConfig,
    next_object_id: AtomicU32,
    schemas: RwLock<StringMap<Arc<Schema>>>,
    users: RwLock<StringMap<Arc<User>>>,
    admin: PrincipalRef,
    meta_lock: ReentrantMutex<()>,
}

impl Database {
    /// Create a database with its admin user and the two system schemas
    pub fn new(config: DatabaseConfig) -> Self {
        let ignore_case = config.ignore_case;
        let next_object_id = AtomicU32::new(1);
        let alloc = || next_object_id.fetch_add(1, Ordering::Relaxed);

        let admin_user = Arc::new(User::new(alloc(), config.admin_user.clone(), true));
        let admin = admin_user.principal();
        let mut users = StringMap::new(ignore_case);
        users.insert(&admin_user.name, admin_user.clone());

        let mut schemas = StringMap::new(ignore_case);
        for name in [&config.main_schema, &config.info_schema] {
            let schema = Schema::new(alloc(), name.clone(), Some(admin.clone()), true, ignore_case);
            schemas.insert(name, Arc::new(schema));
        }
        log::info!(
            "database {} initialized with schemas {}, {}",
            config.name,
            config.main_schema,
            config.info_schema
        );

        Self {
            config,
            next_object_id,
            schemas: RwLock::new(schemas),
            users: RwLock::new(users),
            admin,
            meta_lock: ReentrantMutex::new(()),
        }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    pub fn ignore_case(&self) -> bool {
        self.config.ignore_case
    }

    /// Next free object id, shared by schemas, objects and users
    pub fn allocate_object_id(&self) -> u32 {
        self.next_object_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Acquire the coordinating DDL lock
    ///
    /// The lock is reentrant, so an executor holding it can still call the
    /// locking methods of this type.
    pub fn lock_meta(&self) -> ReentrantMutexGuard<'_, ()> {
        self.meta_lock.lock()
    }

    pub fn admin(&self) -> &PrincipalRef {
        &self.admin
    }

    // === Users ===

    pub fn create_user(&self, name: &str, admin: bool) -> CatalogResult<PrincipalRef> {
        let _meta = self.lock_meta();
        let mut users = self.users.write();
        if users.contains_key(name) {
            return Err(CatalogError::DuplicateUser(name.to_string()));
        }
        let user = Arc::new(User::new(self.allocate_object_id(), name, admin));
        users.insert(name, user.clone());
        log::debug!("created user {}", name);
        Ok(user.principal())
    }

    pub fn find_user(&self, name: &str) -> Option<Arc<User>> {
        self.users.read().get(name).cloned()
    }

    /// Drop a user that owns no schema
    pub fn drop_user(&self, name: &str) -> CatalogResult<()> {
        let _meta = self.lock_meta();
        let user = self
            .find_user(name)
            .ok_or_else(|| CatalogError::UserNotFound(name.to_string()))?;
        self.check_owns_no_schemas(&user.principal())?;
        self.users.write().remove(name);
        log::debug!("dropped user {}", name);
        Ok(())
    }

    /// Fail if `principal` still owns a schema
    pub fn check_owns_no_schemas(&self, principal: &PrincipalRef) -> CatalogResult<()> {
        match self.schemas_owned_by(principal).first() {
            Some(schema) => Err(CatalogError::CannotDrop {
                name: principal.name.clone(),
                dependent: schema.name().to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn schemas_owned_by(&self, principal: &PrincipalRef) -> Vec<Arc<Schema>> {
        self.all_schemas()
            .into_iter()
            .filter(|schema| schema.is_owned_by(principal))
            .collect()
    }

    // === Schemas ===

    pub fn main_schema(&self) -> CatalogResult<Arc<Schema>> {
        self.get_schema(&self.config.main_schema)
    }

    pub fn create_schema(&self, name: &str, owner: PrincipalRef) -> CatalogResult<Arc<Schema>> {
        let _meta = self.lock_meta();
        let mut schemas = self.schemas.write();
        if schemas.contains_key(name) {
            return Err(CatalogError::DuplicateSchema(name.to_string()));
        }
        let schema = Arc::new(Schema::new(
            self.allocate_object_id(),
            name,
            Some(owner),
            false,
            self.config.ignore_case,
        ));
        schemas.insert(name, schema.clone());
        log::debug!("created schema {}", name);
        Ok(schema)
    }

    pub fn find_schema(&self, name: &str) -> Option<Arc<Schema>> {
        self.schemas.read().get(name).cloned()
    }

    pub fn get_schema(&self, name: &str) -> CatalogResult<Arc<Schema>> {
        self.find_schema(name)
            .ok_or_else(|| CatalogError::SchemaNotFound(name.to_string()))
    }

    pub fn all_schemas(&self) -> Vec<Arc<Schema>> {
        self.schemas.read().values()
    }

    /// Drop a schema and everything in it
    ///
    /// System schemas are refused before any object is touched. On a
    /// teardown failure the schema stays registered.
    pub fn drop_schema(&self, session: Option<&Session>, name: &str) -> CatalogResult<()> {
        let _meta = self.lock_meta();
        let schema = self.get_schema(name)?;
        if !schema.can_drop() {
            return Err(CatalogError::SystemSchema(name.to_string()));
        }
        schema.remove_children_and_resources(self, session)?;
        self.schemas.write().remove(name);
        log::info!("dropped schema {}", name);
        Ok(())
    }

    /// The registered schema `obj` belongs to
    pub fn schema_of(&self, obj: &SchemaObjectRef) -> CatalogResult<Arc<Schema>> {
        let schema_ref = obj.schema().ok_or_else(|| {
            CatalogError::internal(format!("{} \"{}\" has no schema", obj.object_type(), obj.name()))
        })?;
        self.all_schemas()
            .into_iter()
            .find(|schema| schema.schema_ref() == schema_ref)
            .ok_or_else(|| {
                CatalogError::internal(format!(
                    "{} \"{}\" refers to an unregistered schema",
                    obj.object_type(),
                    obj.name()
                ))
            })
    }

    // === Schema objects ===

    pub fn add_schema_object(&self, obj: SchemaObjectRef) -> CatalogResult<()> {
        let _meta = self.lock_meta();
        self.schema_of(&obj)?.add(obj)
    }

    /// Rename an object. A taken target name is reported to the user,
    /// not treated as a caller bug.
    pub fn rename_schema_object(&self, obj: &SchemaObjectRef, new_name: &str) -> CatalogResult<()> {
        let _meta = self.lock_meta();
        let schema = self.schema_of(obj)?;
        if schema.find_object(obj.object_type(), new_name)?.is_some() {
            return Err(CatalogError::AlreadyExists {
                object_type: obj.object_type(),
                name: new_name.to_string(),
            });
        }
        schema.rename(obj, new_name)
    }

    /// Drop an object from its schema
    ///
    /// A table still read by another table is refused; a dropped table
    /// takes its indexes with it.
    pub fn remove_schema_object(&self, session: Option<&Session>, obj: &SchemaObjectRef) -> CatalogResult<()> {
        let _meta = self.lock_meta();
        if let Some(table) = obj.as_table() {
            if let Some(dependent) = self.find_dependent_table(table, table) {
                log::warn!("cannot drop {}: used by {}", table.name(), dependent.name());
                return Err(CatalogError::CannotDrop {
                    name: table.name(),
                    dependent: dependent.name(),
                });
            }
            if table.is_temporary() && !table.is_global_temporary() {
                return self.remove_local_temp_table(session, table);
            }
            let schema = self.schema_of(obj)?;
            for index in self.indexes_of_table(session, table)? {
                let index = SchemaObjectRef::Index(index);
                schema.remove(&index)?;
                index.as_object().invalidate();
            }
        }
        self.schema_of(obj)?.remove(obj)?;
        obj.as_object().invalidate();
        Ok(())
    }

    fn remove_local_temp_table(&self, session: Option<&Session>, table: &Table) -> CatalogResult<()> {
        let session = session.ok_or_else(|| {
            CatalogError::internal(format!("local temporary table {} needs a session", table.name()))
        })?;
        session
            .remove_local_temp_table(&table.name())
            .map(|_| ())
            .ok_or_else(|| CatalogError::not_found(ObjectType::TableOrView, &table.name()))
    }

    /// Every index built on `table`
    ///
    /// Indexes of a local temporary table live in the owning session.
    pub fn indexes_of_table(
        &self,
        session: Option<&Session>,
        table: &Arc<Table>,
    ) -> CatalogResult<Vec<Arc<Index>>> {
        if table.is_temporary() && !table.is_global_temporary() {
            let session = session.ok_or_else(|| {
                CatalogError::internal(format!(
                    "local temporary table {} needs a session",
                    table.name()
                ))
            })?;
            return Ok(session.local_temp_table_indexes(table.id()));
        }
        let schema = self.schema_of(&SchemaObjectRef::Table(Arc::clone(table)))?;
        Ok(schema
            .get_all_of(ObjectType::Index)?
            .iter()
            .filter_map(SchemaObjectRef::as_index)
            .filter(|index| index.table_id() == table.id())
            .cloned()
            .collect())
    }

    /// First table other than `skip` that reads from `table`
    pub fn find_dependent_table(&self, table: &Table, skip: &Table) -> Option<Arc<Table>> {
        self.tables_depending_on(table)
            .into_iter()
            .find(|t| t.id() != skip.id())
    }

    fn tables_depending_on(&self, table: &Table) -> Vec<Arc<Table>> {
        self.all_schemas()
            .iter()
            .filter_map(|schema| schema.get_all_tables_and_views().ok())
            .flatten()
            .filter(|t| t.id() != table.id() && t.depends_on(table.id()))
            .collect()
    }
}

impl CatalogHost for Database {
    fn dependents_of(&self, table: &Table) -> Vec<Arc<Table>> {
        self.tables_depending_on(table)
    }

    fn has_dependents(&self, table: &Table) -> bool {
        self.all_schemas().iter().any(|schema| {
            schema
                .get_all_tables_and_views()
                .map(|tables| {
                    tables
                        .iter()
                        .any(|t| t.id() != table.id() && t.depends_on(table.id()))
                })
                .unwrap_or(false)
        })
    }

    fn remove_object(&self, session: Option<&Session>, obj: &SchemaObjectRef) -> CatalogResult<()> {
        self.remove_schema_object(session, obj)
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new(DatabaseConfig::default())
    }
}
