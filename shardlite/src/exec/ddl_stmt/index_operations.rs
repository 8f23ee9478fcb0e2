// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
use crate::catalog::{
    CatalogError, Database, Index, IndexKind, ObjectType, Schema, SchemaObjectRef, Table,
};
use crate::exec::ddl_stmt::{validate_name, DdlStatementExecutor};
use crate::exec::{CreateIndexData, ExecutionError};
use crate::session::Session;
use std::sync::Arc;

/// Executor for CREATE INDEX statements
///
/// An unnamed index gets an implicit name derived from its table. The name
/// stays reserved until the index is registered, so concurrent sessions
/// indexing the same table never pick the same one.
pub struct CreateIndexExecutor {
    data: CreateIndexData,
}

impl CreateIndexExecutor {
    pub fn new(data: CreateIndexData) -> Self {
        Self { data }
    }
}

impl DdlStatementExecutor for CreateIndexExecutor {
    fn describe(&self) -> String {
        format!(
            "CREATE INDEX {} ON {}.{}",
            self.data.index_name.as_deref().unwrap_or("<implicit>"),
            self.data.schema,
            self.data.table
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

        let reservation;
        let name = match &data.index_name {
            Some(name) => {
                validate_name("index", name)?;
                if schema.find_index(Some(session), name)?.is_some() {
                    if data.if_not_exists {
                        return Ok((format!("Index '{}' already exists", name), 0));
                    }
                    return Err(CatalogError::AlreadyExists {
                        object_type: ObjectType::Index,
                        name: name.clone(),
                    }
                    .into());
                }
                name.clone()
            }
            None => {
                reservation = schema.unique_index_name(
                    Some(session),
                    &table,
                    data.kind.implicit_name_prefix(),
                )?;
                reservation.name().to_string()
            }
        };

        add_table_index(db, session, &schema, &table, &name, data.columns.clone(), data.kind)?;
        Ok((format!("Index '{}' created", name), 1))
    }
}

/// Build an index on `table` and register it where the table lives: the
/// session for a local temporary table, the schema otherwise
pub(crate) fn add_table_index(
    db: &Database,
    session: &Session,
    schema: &Schema,
    table: &Table,
    name: &str,
    columns: Vec<String>,
    kind: IndexKind,
) -> Result<Arc<Index>, ExecutionError> {
    let index = Arc::new(Index::new(
        db.allocate_object_id(),
        schema.schema_ref(),
        name,
        table,
        columns,
        kind,
    ));
    if table.is_temporary() && !table.is_global_temporary() {
        session.add_local_temp_table_index(Arc::clone(&index))?;
    } else {
        db.add_schema_object(Arc::clone(&index).into())?;
    }
    Ok(index)
}

/// Executor for DROP INDEX statements
pub struct DropIndexExecutor {
    schema: String,
    name: String,
    if_exists: bool,
}

impl DropIndexExecutor {
    pub fn new(schema: String, name: String, if_exists: bool) -> Self {
        Self {
            schema,
            name,
            if_exists,
        }
    }
}

impl DdlStatementExecutor for DropIndexExecutor {
    fn describe(&self) -> String {
        format!("DROP INDEX {}.{}", self.schema, self.name)
    }

    fn execute_ddl_operation(
        &self,
        db: &Database,
        session: &Session,
    ) -> Result<(String, usize), ExecutionError> {
        let schema = db.get_schema(&self.schema)?;
        match schema.find_index(None, &self.name)? {
            Some(index) => db.remove_schema_object(Some(session), &SchemaObjectRef::Index(index))?,
            None => {
                if session.remove_local_temp_table_index(&self.name).is_none() {
                    if self.if_exists {
                        return Ok((format!("Index '{}' does not exist", self.name), 0));
                    }
                    return Err(CatalogError::NotFound {
                        object_type: ObjectType::Index,
                        name: self.name.clone(),
                    }
                    .into());
                }
            }
        }
        Ok((format!("Index '{}' dropped", self.name), 1))
    }
}
