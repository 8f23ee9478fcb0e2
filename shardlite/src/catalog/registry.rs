// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Typed object registry
//!
//! Five independent name spaces, one per [`ObjectType`], addressed through
//! a single table so add, rename and remove share one code path. The
//! registry checks its invariants unconditionally and fails closed: a
//! rejected call leaves every name space untouched.

use super::error::{CatalogError, CatalogResult};
use super::object::{ObjectType, SchemaObjectRef, SchemaRef};
use super::string_map::StringMap;

/// Lifecycle of a schema. `Invalid` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    Active,
    Invalid,
}

#[derive(Debug)]
pub(crate) struct TypedRegistry {
    maps: [StringMap<SchemaObjectRef>; ObjectType::COUNT],
    state: SchemaState,
}

impl TypedRegistry {
    pub(crate) fn new(ignore_case: bool) -> Self {
        Self {
            maps: std::array::from_fn(|_| StringMap::new(ignore_case)),
            state: SchemaState::Active,
        }
    }

    pub(crate) fn state(&self) -> SchemaState {
        self.state
    }

    pub(crate) fn invalidate(&mut self) {
        self.state = SchemaState::Invalid;
    }

    pub(crate) fn ensure_active(&self, schema_name: &str) -> CatalogResult<()> {
        match self.state {
            SchemaState::Active => Ok(()),
            SchemaState::Invalid => Err(CatalogError::SchemaInvalid(schema_name.to_string())),
        }
    }

    pub(crate) fn map(&self, object_type: ObjectType) -> &StringMap<SchemaObjectRef> {
        &self.maps[object_type.index()]
    }

    fn map_mut(&mut self, object_type: ObjectType) -> &mut StringMap<SchemaObjectRef> {
        &mut self.maps[object_type.index()]
    }

    pub(crate) fn get(&self, object_type: ObjectType, name: &str) -> Option<&SchemaObjectRef> {
        self.map(object_type).get(name)
    }

    /// True when `obj` itself (not just its name) is registered
    pub(crate) fn contains(&self, obj: &SchemaObjectRef) -> bool {
        self.get(obj.object_type(), &obj.name())
            .map(|entry| entry.same_object(obj))
            .unwrap_or(false)
    }

    pub(crate) fn add(&mut self, owner: SchemaRef, obj: SchemaObjectRef) -> CatalogResult<String> {
        if obj.schema() != Some(owner) {
            return Err(CatalogError::internal(format!(
                "wrong schema for {} \"{}\"",
                obj.object_type(),
                obj.name()
            )));
        }
        let name = obj.name();
        let map = self.map_mut(obj.object_type());
        if map.contains_key(&name) {
            return Err(CatalogError::internal(format!(
                "object already exists: {}",
                name
            )));
        }
        map.insert(&name, obj);
        Ok(name)
    }

    /// Move `obj` to `new_name`, returning the old name
    pub(crate) fn rename(&mut self, obj: &SchemaObjectRef, new_name: &str) -> CatalogResult<String> {
        let old_name = obj.name();
        let map = self.map(obj.object_type());
        if !map.get(&old_name).map(|entry| entry.same_object(obj)).unwrap_or(false) {
            return Err(CatalogError::internal(format!("not found: {}", old_name)));
        }
        if old_name == new_name || map.contains_key(new_name) {
            return Err(CatalogError::internal(format!(
                "object already exists: {}",
                new_name
            )));
        }
        obj.as_object().check_rename()?;

        let map = self.map_mut(obj.object_type());
        map.remove(&old_name);
        obj.as_object().rename(new_name);
        map.insert(new_name, obj.clone());
        Ok(old_name)
    }

    pub(crate) fn remove(&mut self, obj: &SchemaObjectRef) -> CatalogResult<String> {
        let name = obj.name();
        let map = self.map_mut(obj.object_type());
        match map.get(&name).map(|entry| entry.same_object(obj)) {
            Some(true) => {
                map.remove(&name);
                Ok(name)
            }
            Some(false) => Err(CatalogError::internal(format!(
                "{} \"{}\" is a different object",
                obj.object_type(),
                name
            ))),
            None => Err(CatalogError::internal(format!("not found: {}", name))),
        }
    }

    /// Snapshot of every object: tables and views, sequences, indexes,
    /// constants, then functions
    pub(crate) fn all(&self) -> Vec<SchemaObjectRef> {
        [
            ObjectType::TableOrView,
            ObjectType::Sequence,
            ObjectType::Index,
            ObjectType::Constant,
            ObjectType::FunctionAlias,
        ]
        .iter()
        .flat_map(|object_type| self.map(*object_type).values())
        .collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.maps.iter().all(StringMap::is_empty)
    }
}
