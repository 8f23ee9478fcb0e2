// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Index metadata

use super::table::Table;
use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::object::{ObjectBase, ObjectType, SchemaObject, SchemaRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IndexKind {
    PrimaryKey,
    Unique,
    #[default]
    NonUnique,
}

impl IndexKind {
    /// Prefix used when the index name has to be generated
    pub fn implicit_name_prefix(self) -> &'static str {
        match self {
            IndexKind::PrimaryKey => "PRIMARY_KEY_",
            IndexKind::Unique | IndexKind::NonUnique => "INDEX_",
        }
    }
}

/// An index on a table
#[derive(Debug)]
pub struct Index {
    base: ObjectBase,
    table_id: u32,
    table_name: String,
    columns: Vec<String>,
    kind: IndexKind,
}

impl Index {
    pub fn new(
        id: u32,
        schema: SchemaRef,
        name: impl Into<String>,
        table: &Table,
        columns: Vec<String>,
        kind: IndexKind,
    ) -> Self {
        Self {
            base: ObjectBase::new(id, schema, name),
            table_id: table.id(),
            table_name: table.name(),
            columns,
            kind,
        }
    }

    pub fn table_id(&self) -> u32 {
        self.table_id
    }

    /// Table name at index creation time
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn kind(&self) -> IndexKind {
        self.kind
    }
}

impl SchemaObject for Index {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::Index
    }

    fn check_rename(&self) -> CatalogResult<()> {
        // the primary key constraint owns this name
        if self.kind == IndexKind::PrimaryKey {
            return Err(CatalogError::Unsupported(format!(
                "rename of primary key index \"{}\"",
                self.name()
            )));
        }
        Ok(())
    }
}
