// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
use crate::catalog::{CatalogError, Database, IndexKind, SchemaObject, Table};
use crate::exec::ddl_stmt::{add_table_index, validate_name, DdlStatementExecutor};
use crate::exec::{
    AddConstraintData, AlterColumnAction, AlterColumnData, ConstraintKind, ExecutionError,
};
use crate::session::Session;
use std::sync::Arc;

fn reject_view(table: &Table) -> Result<(), ExecutionError> {
    if table.is_view() {
        return Err(ExecutionError::InvalidStatement(format!(
            "'{}' is a view",
            table.name()
        )));
    }
    Ok(())
}

fn require_columns(table: &Table, columns: &[String]) -> Result<(), ExecutionError> {
    if columns.is_empty() {
        return Err(ExecutionError::InvalidStatement(
            "Constraint needs at least one column".to_string(),
        ));
    }
    for column in columns {
        if !table.has_column(column) {
            return Err(CatalogError::ColumnNotFound {
                table: table.name(),
                column: column.clone(),
            }
            .into());
        }
    }
    Ok(())
}

/// Executor for ALTER TABLE ADD/DROP/ALTER COLUMN statements
pub struct AlterTableAlterColumnExecutor {
    data: AlterColumnData,
}

impl AlterTableAlterColumnExecutor {
    pub fn new(data: AlterColumnData) -> Self {
        Self { data }
    }

    fn primary_key_columns(
        db: &Database,
        session: &Session,
        table: &Arc<Table>,
    ) -> Result<Vec<String>, ExecutionError> {
        Ok(db
            .indexes_of_table(Some(session), table)?
            .iter()
            .filter(|index| index.kind() == IndexKind::PrimaryKey)
            .flat_map(|index| index.columns().to_vec())
            .collect())
    }
}

impl DdlStatementExecutor for AlterTableAlterColumnExecutor {
    fn describe(&self) -> String {
        let action = match &self.data.action {
            AlterColumnAction::Add(column) => format!("ADD COLUMN {}", column.name),
            AlterColumnAction::Drop(column) => format!("DROP COLUMN {}", column),
            AlterColumnAction::ChangeType { column, data_type } => {
                format!("ALTER COLUMN {} {}", column, data_type)
            }
            AlterColumnAction::SetNullable { column, nullable } => format!(
                "ALTER COLUMN {} SET {}",
                column,
                if *nullable { "NULL" } else { "NOT NULL" }
            ),
            AlterColumnAction::SetDefault { column, .. } => {
                format!("ALTER COLUMN {} SET DEFAULT", column)
            }
        };
        format!("ALTER TABLE {}.{} {}", self.data.schema, self.data.table, action)
    }

    fn execute_ddl_operation(
        &self,
        db: &Database,
        session: &Session,
    ) -> Result<(String, usize), ExecutionError> {
        let data = &self.data;
        let schema = db.get_schema(&data.schema)?;
        let table = schema.get_table_or_view(Some(session), &data.table)?;
        reject_view(&table)?;

        match &data.action {
            AlterColumnAction::Add(column) => {
                validate_name("column", &column.name)?;
                table.add_column(column.clone())?;
                Ok((format!("Column '{}' added", column.name), 1))
            }
            AlterColumnAction::Drop(name) => {
                if !table.has_column(name) {
                    return Err(CatalogError::ColumnNotFound {
                        table: table.name(),
                        column: name.clone(),
                    }
                    .into());
                }
                if table.columns().len() == 1 {
                    return Err(ExecutionError::InvalidStatement(format!(
                        "Cannot drop the last column of table '{}'",
                        table.name()
                    )));
                }
                let indexes = db.indexes_of_table(Some(session), &table)?;
                if let Some(index) = indexes
                    .iter()
                    .find(|index| index.columns().iter().any(|c| c == name))
                {
                    return Err(CatalogError::CannotDrop {
                        name: name.clone(),
                        dependent: index.name(),
                    }
                    .into());
                }
                table.drop_column(name)?;
                Ok((format!("Column '{}' dropped", name), 1))
            }
            AlterColumnAction::ChangeType { column, data_type } => {
                if data_type.trim().is_empty() {
                    return Err(ExecutionError::InvalidStatement(format!(
                        "Missing data type for column '{}'",
                        column
                    )));
                }
                table.update_column(column, |c| c.data_type = data_type.clone())?;
                Ok((format!("Column '{}' altered", column), 1))
            }
            AlterColumnAction::SetNullable { column, nullable } => {
                if *nullable && Self::primary_key_columns(db, session, &table)?.contains(column) {
                    return Err(ExecutionError::InvalidStatement(format!(
                        "Column '{}' is part of the primary key",
                        column
                    )));
                }
                table.update_column(column, |c| c.nullable = *nullable)?;
                Ok((format!("Column '{}' altered", column), 1))
            }
            AlterColumnAction::SetDefault { column, expression } => {
                table.update_column(column, |c| c.default_expression = expression.clone())?;
                Ok((format!("Column '{}' altered", column), 1))
            }
        }
    }
}

/// Executor for ALTER TABLE ADD CONSTRAINT statements
///
/// Primary key, unique and foreign key constraints are enforced through an
/// index on the constrained columns. The index name is generated, so it
/// stays reserved until the index is registered.
pub struct AlterTableAddConstraintExecutor {
    data: AddConstraintData,
}

impl AlterTableAddConstraintExecutor {
    pub fn new(data: AddConstraintData) -> Self {
        Self { data }
    }

    fn index_name_prefix(&self) -> String {
        match self.data.kind {
            ConstraintKind::PrimaryKey => IndexKind::PrimaryKey.implicit_name_prefix().to_string(),
            _ => format!(
                "{}_INDEX_",
                self.data.constraint_name.as_deref().unwrap_or("CONSTRAINT")
            ),
        }
    }
}

impl DdlStatementExecutor for AlterTableAddConstraintExecutor {
    fn describe(&self) -> String {
        let kind = match &self.data.kind {
            ConstraintKind::PrimaryKey => "PRIMARY KEY",
            ConstraintKind::Unique => "UNIQUE",
            ConstraintKind::Referential { .. } => "FOREIGN KEY",
            ConstraintKind::Check(_) => "CHECK",
        };
        format!(
            "ALTER TABLE {}.{} ADD {}",
            self.data.schema, self.data.table, kind
        )
    }

    fn execute_ddl_operation(
        &self,
        db: &Database,
        session: &Session,
    ) -> Result<(String, usize), ExecutionError> {
        let data = &self.data;
        let schema = db.get_schema(&data.schema)?;
        let table = schema.get_table_or_view(Some(session), &data.table)?;
        reject_view(&table)?;

        let index_kind = match &data.kind {
            ConstraintKind::Check(expression) => {
                if expression.trim().is_empty() {
                    return Err(ExecutionError::InvalidStatement(
                        "Check constraint needs an expression".to_string(),
                    ));
                }
                table.add_check(expression.clone());
                return Ok((format!("Check constraint added to '{}'", table.name()), 1));
            }
            ConstraintKind::PrimaryKey => {
                require_columns(&table, &data.columns)?;
                let existing = db.indexes_of_table(Some(session), &table)?;
                if existing.iter().any(|i| i.kind() == IndexKind::PrimaryKey) {
                    return Err(ExecutionError::InvalidStatement(format!(
                        "Table '{}' already has a primary key",
                        table.name()
                    )));
                }
                IndexKind::PrimaryKey
            }
            ConstraintKind::Unique => {
                require_columns(&table, &data.columns)?;
                IndexKind::Unique
            }
            ConstraintKind::Referential {
                ref_table,
                ref_columns,
            } => {
                require_columns(&table, &data.columns)?;
                let referenced = schema.get_table_or_view(Some(session), ref_table)?;
                if ref_columns.len() != data.columns.len() {
                    return Err(ExecutionError::InvalidStatement(format!(
                        "Foreign key on '{}' lists {} columns but references {}",
                        table.name(),
                        data.columns.len(),
                        ref_columns.len()
                    )));
                }
                require_columns(&referenced, ref_columns)?;
                // an index on exactly these columns already serves the lookup
                let existing = db.indexes_of_table(Some(session), &table)?;
                if let Some(index) = existing.iter().find(|i| i.columns() == data.columns.as_slice()) {
                    return Ok((
                        format!("Foreign key added to '{}' using index '{}'", table.name(), index.name()),
                        1,
                    ));
                }
                IndexKind::NonUnique
            }
        };

        let prefix = self.index_name_prefix();
        let reservation = schema.unique_index_name(Some(session), &table, &prefix)?;
        let index = add_table_index(
            db,
            session,
            &schema,
            &table,
            reservation.name(),
            data.columns.clone(),
            index_kind,
        )?;
        if index_kind == IndexKind::PrimaryKey {
            for column in &data.columns {
                table.update_column(column, |c| c.nullable = false)?;
            }
        }
        Ok((
            format!("Constraint added to '{}' with index '{}'", table.name(), index.name()),
            1,
        ))
    }
}
