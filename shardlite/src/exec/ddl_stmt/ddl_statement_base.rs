// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
use crate::catalog::{Database, ObjectType, Schema};
use crate::exec::{ExecutionError, ExecutionOutcome, StatementExecutor};
use crate::session::Session;
use std::sync::Arc;

/// Base trait for all DDL statement executors
pub trait DdlStatementExecutor: Send + Sync {
    fn describe(&self) -> String;

    /// Execute the DDL operation
    /// Returns a description message and the number of affected entities
    fn execute_ddl_operation(
        &self,
        db: &Database,
        session: &Session,
    ) -> Result<(String, usize), ExecutionError>;
}

impl<T: DdlStatementExecutor> StatementExecutor for T {
    fn operation_description(&self) -> String {
        self.describe()
    }

    /// Runs the whole check-then-act sequence under the meta lock
    fn execute(&self, db: &Database, session: &Session) -> Result<ExecutionOutcome, ExecutionError> {
        let _meta = db.lock_meta();
        log::debug!("session {}: {}", session.id(), self.describe());
        let (message, affected) = self.execute_ddl_operation(db, session)?;
        Ok(ExecutionOutcome::new(message, affected))
    }
}

/// Reject empty or blank identifiers
pub(crate) fn validate_name(kind: &str, name: &str) -> Result<(), ExecutionError> {
    if name.trim().is_empty() {
        return Err(ExecutionError::InvalidStatement(format!(
            "Invalid {} name: name cannot be empty",
            kind
        )));
    }
    Ok(())
}

/// Resolve `schema_name` and fail if `name` is already taken in the
/// `object_type` name space. Returns `None` when the statement should be a
/// no-op because of IF NOT EXISTS.
pub(crate) fn schema_for_create(
    db: &Database,
    schema_name: &str,
    object_type: ObjectType,
    name: &str,
    if_not_exists: bool,
) -> Result<Option<Arc<Schema>>, ExecutionError> {
    validate_name(&object_type.to_string(), name)?;
    let schema = db.get_schema(schema_name)?;
    if schema.find_object(object_type, name)?.is_some() {
        if if_not_exists {
            return Ok(None);
        }
        return Err(crate::catalog::CatalogError::AlreadyExists {
            object_type,
            name: name.to_string(),
        }
        .into());
    }
    Ok(Some(schema))
}
