// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Table and view metadata

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::object::{ObjectBase, ObjectType, SchemaObject, SchemaRef};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Whether a table-or-view entry is a base table or a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TableKind {
    #[default]
    Table,
    View,
}

/// Visibility scope of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TemporaryScope {
    /// Regular table, visible to every session
    #[default]
    Persistent,
    /// Temporary table visible to every session
    GlobalTemporary,
    /// Temporary table owned by a single session
    LocalTemporary,
}

/// Column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    /// Expression text of a computed column
    pub computed: Option<String>,
    #[serde(default = "nullable_by_default")]
    pub nullable: bool,
    #[serde(default)]
    pub default_expression: Option<String>,
}

fn nullable_by_default() -> bool {
    true
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            computed: None,
            nullable: true,
            default_expression: None,
        }
    }

    pub fn computed(
        name: impl Into<String>,
        data_type: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            computed: Some(expression.into()),
            nullable: true,
            default_expression: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Everything needed to define a table; consumed by the execution layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTableData {
    pub schema: String,
    pub table_name: String,
    pub columns: Vec<Column>,
    pub kind: TableKind,
    pub scope: TemporaryScope,
    /// Tables in the same schema read by computed columns or the view query
    pub references: Vec<String>,
    pub if_not_exists: bool,
}

/// A table or view registered in a schema
#[derive(Debug)]
pub struct Table {
    base: ObjectBase,
    kind: TableKind,
    scope: TemporaryScope,
    columns: RwLock<Vec<Column>>,
    /// Check constraint expressions
    checks: RwLock<Vec<String>>,
    /// Ids of the tables this one depends on
    references: Vec<u32>,
}

impl Table {
    pub fn new(id: u32, schema: SchemaRef, name: impl Into<String>) -> Self {
        Self {
            base: ObjectBase::new(id, schema, name),
            kind: TableKind::Table,
            scope: TemporaryScope::Persistent,
            columns: RwLock::new(Vec::new()),
            checks: RwLock::new(Vec::new()),
            references: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: TableKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_scope(mut self, scope: TemporaryScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.get_mut().push(column);
        self
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns.get_mut().extend(columns);
        self
    }

    /// Record that this table reads `table` (computed column or view query)
    pub fn with_reference(mut self, table: &Table) -> Self {
        self.references.push(table.id());
        self
    }

    pub fn with_reference_ids(mut self, ids: Vec<u32>) -> Self {
        self.references.extend(ids);
        self
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn scope(&self) -> TemporaryScope {
        self.scope
    }

    /// Snapshot of the column list, in definition order
    pub fn columns(&self) -> Vec<Column> {
        self.columns.read().clone()
    }

    pub fn column(&self, name: &str) -> Option<Column> {
        self.columns.read().iter().find(|c| c.name == name).cloned()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.read().iter().any(|c| c.name == name)
    }

    pub fn add_column(&self, column: Column) -> CatalogResult<()> {
        let mut columns = self.columns.write();
        if columns.iter().any(|c| c.name == column.name) {
            return Err(CatalogError::DuplicateColumn {
                table: self.name(),
                column: column.name,
            });
        }
        columns.push(column);
        Ok(())
    }

    pub fn drop_column(&self, name: &str) -> CatalogResult<Column> {
        let mut columns = self.columns.write();
        let position = columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| self.column_not_found(name))?;
        Ok(columns.remove(position))
    }

    /// Change a column in place, keeping its position
    pub fn update_column<F>(&self, name: &str, change: F) -> CatalogResult<()>
    where
        F: FnOnce(&mut Column),
    {
        let mut columns = self.columns.write();
        let column = columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| self.column_not_found(name))?;
        change(column);
        Ok(())
    }

    pub fn add_check(&self, expression: impl Into<String>) {
        self.checks.write().push(expression.into());
    }

    pub fn checks(&self) -> Vec<String> {
        self.checks.read().clone()
    }

    fn column_not_found(&self, name: &str) -> CatalogError {
        CatalogError::ColumnNotFound {
            table: self.name(),
            column: name.to_string(),
        }
    }

    pub fn references(&self) -> &[u32] {
        &self.references
    }

    pub fn depends_on(&self, table_id: u32) -> bool {
        self.references.contains(&table_id)
    }

    pub fn is_view(&self) -> bool {
        self.kind == TableKind::View
    }

    pub fn is_temporary(&self) -> bool {
        self.scope != TemporaryScope::Persistent
    }

    pub fn is_global_temporary(&self) -> bool {
        self.scope == TemporaryScope::GlobalTemporary
    }
}

impl SchemaObject for Table {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::TableOrView
    }
}
