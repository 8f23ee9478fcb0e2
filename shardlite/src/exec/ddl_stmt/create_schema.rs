// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
use crate::catalog::Database;
use crate::exec::ddl_stmt::{validate_name, DdlStatementExecutor};
use crate::exec::ExecutionError;
use crate::session::Session;

/// Executor for CREATE SCHEMA statements
pub struct CreateSchemaExecutor {
    name: String,
    if_not_exists: bool,
}

impl CreateSchemaExecutor {
    pub fn new(name: String, if_not_exists: bool) -> Self {
        Self {
            name,
            if_not_exists,
        }
    }
}

impl DdlStatementExecutor for CreateSchemaExecutor {
    fn describe(&self) -> String {
        if self.if_not_exists {
            format!("CREATE SCHEMA IF NOT EXISTS {}", self.name)
        } else {
            format!("CREATE SCHEMA {}", self.name)
        }
    }

    fn execute_ddl_operation(
        &self,
        db: &Database,
        session: &Session,
    ) -> Result<(String, usize), ExecutionError> {
        validate_name("schema", &self.name)?;
        if self.if_not_exists && db.find_schema(&self.name).is_some() {
            return Ok((format!("Schema '{}' already exists", self.name), 0));
        }
        db.create_schema(&self.name, session.user().clone())?;
        Ok((format!("Schema '{}' created", self.name), 1))
    }
}
