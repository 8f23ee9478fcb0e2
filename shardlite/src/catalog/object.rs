// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema object contract
//!
//! Every object owned by a schema (tables and views, indexes, sequences,
//! constants and function aliases) implements [`SchemaObject`]. The schema
//! holds objects through [`SchemaObjectRef`], a closed enum over the five
//! kinds, so dispatch by [`ObjectType`] is checked by the compiler.

use super::error::CatalogResult;
use super::objects::{Constant, FunctionAlias, Index, Sequence, Table};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Object kinds a schema keeps in separate name spaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectType {
    TableOrView,
    Index,
    Sequence,
    Constant,
    FunctionAlias,
}

impl ObjectType {
    /// Number of object kinds (and sub-catalogs per schema)
    pub const COUNT: usize = 5;

    /// All kinds, in teardown order
    pub const ALL: [ObjectType; ObjectType::COUNT] = [
        ObjectType::TableOrView,
        ObjectType::Index,
        ObjectType::Sequence,
        ObjectType::Constant,
        ObjectType::FunctionAlias,
    ];

    /// Slot of this kind in a per-schema sub-catalog table
    pub fn index(self) -> usize {
        match self {
            ObjectType::TableOrView => 0,
            ObjectType::Index => 1,
            ObjectType::Sequence => 2,
            ObjectType::Constant => 3,
            ObjectType::FunctionAlias => 4,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ObjectType::TableOrView => "table or view",
            ObjectType::Index => "index",
            ObjectType::Sequence => "sequence",
            ObjectType::Constant => "constant",
            ObjectType::FunctionAlias => "function alias",
        };
        write!(f, "{}", s)
    }
}

/// Identity of one schema instance
///
/// Objects refer back to their schema through this token rather than a
/// pointer. Two schemas never share a token, even when they share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaRef {
    id: u32,
    token: u64,
}

impl SchemaRef {
    pub(crate) fn allocate(id: u32) -> Self {
        static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);
        Self {
            id,
            token: NEXT_TOKEN.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Schema object id
    pub fn id(&self) -> u32 {
        self.id
    }
}

/// State shared by every schema object: id, current name and owning schema
#[derive(Debug)]
pub struct ObjectBase {
    id: u32,
    name: RwLock<String>,
    schema: RwLock<Option<SchemaRef>>,
}

impl ObjectBase {
    pub fn new(id: u32, schema: SchemaRef, name: impl Into<String>) -> Self {
        Self {
            id,
            name: RwLock::new(name.into()),
            schema: RwLock::new(Some(schema)),
        }
    }
}

/// Capabilities of an object owned by a schema
///
/// Implementors only provide [`SchemaObject::base`] and
/// [`SchemaObject::object_type`]; a kind with extra rename rules overrides
/// [`SchemaObject::check_rename`].
pub trait SchemaObject: Send + Sync + fmt::Debug {
    fn base(&self) -> &ObjectBase;

    fn object_type(&self) -> ObjectType;

    fn id(&self) -> u32 {
        self.base().id
    }

    fn name(&self) -> String {
        self.base().name.read().clone()
    }

    /// Owning schema, `None` once the object has been invalidated
    fn schema(&self) -> Option<SchemaRef> {
        *self.base().schema.read()
    }

    /// Validation hook run by the schema before it commits a rename
    fn check_rename(&self) -> CatalogResult<()> {
        Ok(())
    }

    /// Set the object's name. Only the owning schema calls this.
    fn rename(&self, new_name: &str) {
        *self.base().name.write() = new_name.to_string();
    }

    /// Detach the object from its schema
    fn invalidate(&self) {
        *self.base().schema.write() = None;
    }

    fn is_valid(&self) -> bool {
        self.schema().is_some()
    }
}

/// Shared handle to any schema object
#[derive(Debug, Clone)]
pub enum SchemaObjectRef {
    Table(Arc<Table>),
    Index(Arc<Index>),
    Sequence(Arc<Sequence>),
    Constant(Arc<Constant>),
    FunctionAlias(Arc<FunctionAlias>),
}

impl SchemaObjectRef {
    pub fn as_object(&self) -> &dyn SchemaObject {
        match self {
            SchemaObjectRef::Table(obj) => obj.as_ref(),
            SchemaObjectRef::Index(obj) => obj.as_ref(),
            SchemaObjectRef::Sequence(obj) => obj.as_ref(),
            SchemaObjectRef::Constant(obj) => obj.as_ref(),
            SchemaObjectRef::FunctionAlias(obj) => obj.as_ref(),
        }
    }

    pub fn name(&self) -> String {
        self.as_object().name()
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            SchemaObjectRef::Table(_) => ObjectType::TableOrView,
            SchemaObjectRef::Index(_) => ObjectType::Index,
            SchemaObjectRef::Sequence(_) => ObjectType::Sequence,
            SchemaObjectRef::Constant(_) => ObjectType::Constant,
            SchemaObjectRef::FunctionAlias(_) => ObjectType::FunctionAlias,
        }
    }

    pub fn schema(&self) -> Option<SchemaRef> {
        self.as_object().schema()
    }

    /// True when both handles point at the same allocation
    pub fn same_object(&self, other: &SchemaObjectRef) -> bool {
        match (self, other) {
            (SchemaObjectRef::Table(a), SchemaObjectRef::Table(b)) => Arc::ptr_eq(a, b),
            (SchemaObjectRef::Index(a), SchemaObjectRef::Index(b)) => Arc::ptr_eq(a, b),
            (SchemaObjectRef::Sequence(a), SchemaObjectRef::Sequence(b)) => Arc::ptr_eq(a, b),
            (SchemaObjectRef::Constant(a), SchemaObjectRef::Constant(b)) => Arc::ptr_eq(a, b),
            (SchemaObjectRef::FunctionAlias(a), SchemaObjectRef::FunctionAlias(b)) => {
                Arc::ptr_eq(a, b)
            }
            _ => false,
        }
    }

    pub fn as_table(&self) -> Option<&Arc<Table>> {
        match self {
            SchemaObjectRef::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_index(&self) -> Option<&Arc<Index>> {
        match self {
            SchemaObjectRef::Index(index) => Some(index),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Arc<Sequence>> {
        match self {
            SchemaObjectRef::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    pub fn as_constant(&self) -> Option<&Arc<Constant>> {
        match self {
            SchemaObjectRef::Constant(constant) => Some(constant),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Arc<FunctionAlias>> {
        match self {
            SchemaObjectRef::FunctionAlias(function) => Some(function),
            _ => None,
        }
    }
}

macro_rules! impl_from_object {
    ($ty:ident, $variant:ident) => {
        impl From<Arc<$ty>> for SchemaObjectRef {
            fn from(obj: Arc<$ty>) -> Self {
                SchemaObjectRef::$variant(obj)
            }
        }

        impl From<$ty> for SchemaObjectRef {
            fn from(obj: $ty) -> Self {
                SchemaObjectRef::$variant(Arc::new(obj))
            }
        }
    };
}

impl_from_object!(Table, Table);
impl_from_object!(Index, Index);
impl_from_object!(Sequence, Sequence);
impl_from_object!(Constant, Constant);
impl_from_object!(FunctionAlias, FunctionAlias);
