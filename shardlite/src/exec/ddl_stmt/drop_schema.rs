// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
use crate::catalog::Database;
use crate::exec::ddl_stmt::DdlStatementExecutor;
use crate::exec::ExecutionError;
use crate::session::Session;

/// Executor for DROP SCHEMA statements
pub struct DropSchemaExecutor {
    name: String,
    if_exists: bool,
}

impl DropSchemaExecutor {
    pub fn new(name: String, if_exists: bool) -> Self {
        Self { name, if_exists }
    }
}

impl DdlStatementExecutor for DropSchemaExecutor {
    fn describe(&self) -> String {
        if self.if_exists {
            format!("DROP SCHEMA IF EXISTS {}", self.name)
        } else {
            format!("DROP SCHEMA {}", self.name)
        }
    }

    fn execute_ddl_operation(
        &self,
        db: &Database,
        session: &Session,
    ) -> Result<(String, usize), ExecutionError> {
        let Some(schema) = db.find_schema(&self.name) else {
            if self.if_exists {
                return Ok((format!("Schema '{}' does not exist", self.name), 0));
            }
            return Err(crate::catalog::CatalogError::SchemaNotFound(self.name.clone()).into());
        };
        let objects = schema.get_all()?.len();
        db.drop_schema(Some(session), &self.name)?;
        Ok((
            format!("Schema '{}' dropped with {} objects", self.name, objects),
            objects + 1,
        ))
    }
}
