// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
use crate::catalog::{
    CatalogError, CreateTableData, Database, ObjectType, SchemaObject, SchemaObjectRef, Table,
    TableKind, TemporaryScope,
};
use crate::exec::ddl_stmt::{schema_for_create, DdlStatementExecutor};
use crate::exec::ExecutionError;
use crate::session::Session;
use std::sync::Arc;

/// Executor for CREATE TABLE / CREATE VIEW statements
///
/// Local temporary tables are registered with the session, everything else
/// with the schema.
pub struct CreateTableExecutor {
    data: CreateTableData,
}

impl CreateTableExecutor {
    pub fn new(data: CreateTableData) -> Self {
        Self { data }
    }
}

impl DdlStatementExecutor for CreateTableExecutor {
    fn describe(&self) -> String {
        let kind = match self.data.kind {
            TableKind::Table => "TABLE",
            TableKind::View => "VIEW",
        };
        format!("CREATE {} {}.{}", kind, self.data.schema, self.data.table_name)
    }

    fn execute_ddl_operation(
        &self,
        db: &Database,
        session: &Session,
    ) -> Result<(String, usize), ExecutionError> {
        let data = &self.data;
        let Some(schema) = schema_for_create(
            db,
            &data.schema,
            ObjectType::TableOrView,
            &data.table_name,
            data.if_not_exists,
        )?
        else {
            return Ok((format!("Table '{}' already exists", data.table_name), 0));
        };
        if session.find_local_temp_table(&data.table_name).is_some() {
            return Err(CatalogError::AlreadyExists {
                object_type: ObjectType::TableOrView,
                name: data.table_name.clone(),
            }
            .into());
        }

        let mut references = Vec::with_capacity(data.references.len());
        for name in &data.references {
            references.push(schema.get_table_or_view(Some(session), name)?.id());
        }

        let table = Arc::new(
            Table::new(db.allocate_object_id(), schema.schema_ref(), data.table_name.clone())
                .with_kind(data.kind)
                .with_scope(data.scope)
                .with_columns(data.columns.clone())
                .with_reference_ids(references),
        );
        if data.scope == TemporaryScope::LocalTemporary {
            session.add_local_temp_table(table)?;
        } else {
            db.add_schema_object(table.into())?;
        }
        Ok((format!("Table '{}' created", data.table_name), 1))
    }
}

/// Executor for DROP TABLE statements
pub struct DropTableExecutor {
    schema: String,
    name: String,
    if_exists: bool,
}

impl DropTableExecutor {
    pub fn new(schema: String, name: String, if_exists: bool) -> Self {
        Self {
            schema,
            name,
            if_exists,
        }
    }
}

impl DdlStatementExecutor for DropTableExecutor {
    fn describe(&self) -> String {
        format!("DROP TABLE {}.{}", self.schema, self.name)
    }

    fn execute_ddl_operation(
        &self,
        db: &Database,
        session: &Session,
    ) -> Result<(String, usize), ExecutionError> {
        let schema = db.get_schema(&self.schema)?;
        let Some(table) = schema.find_table_or_view(Some(session), &self.name)? else {
            if self.if_exists {
                return Ok((format!("Table '{}' does not exist", self.name), 0));
            }
            return Err(CatalogError::NotFound {
                object_type: ObjectType::TableOrView,
                name: self.name.clone(),
            }
            .into());
        };
        db.remove_schema_object(Some(session), &SchemaObjectRef::Table(table))?;
        Ok((format!("Table '{}' dropped", self.name), 1))
    }
}
