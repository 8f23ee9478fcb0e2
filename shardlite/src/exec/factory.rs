// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement dispatch: one executor per statement kind

use crate::catalog::Database;
use crate::exec::ddl_stmt::{
    AlterRenameExecutor, AlterTableAddConstraintExecutor, AlterTableAlterColumnExecutor,
    CreateConstantExecutor, CreateFunctionAliasExecutor, CreateIndexExecutor,
    CreateSchemaExecutor, CreateSequenceExecutor, CreateTableExecutor, DropIndexExecutor,
    DropSchemaExecutor, DropTableExecutor,
};
use crate::exec::{ExecutionError, ExecutionOutcome, Statement};
use crate::session::Session;

/// An executable statement
pub trait StatementExecutor: Send + Sync {
    /// Short description used in logs
    fn operation_description(&self) -> String;

    fn execute(&self, db: &Database, session: &Session) -> Result<ExecutionOutcome, ExecutionError>;
}

/// Selects the execution strategy for a statement
pub struct ExecutorFactory;

impl ExecutorFactory {
    pub fn new_executor(statement: Statement) -> Result<Box<dyn StatementExecutor>, ExecutionError> {
        let executor: Box<dyn StatementExecutor> = match statement {
            Statement::CreateSchema {
                name,
                if_not_exists,
            } => Box::new(CreateSchemaExecutor::new(name, if_not_exists)),
            Statement::DropSchema { name, if_exists } => {
                Box::new(DropSchemaExecutor::new(name, if_exists))
            }
            Statement::CreateTable(data) => Box::new(CreateTableExecutor::new(data)),
            Statement::DropTable {
                schema,
                name,
                if_exists,
            } => Box::new(DropTableExecutor::new(schema, name, if_exists)),
            Statement::CreateIndex(data) => Box::new(CreateIndexExecutor::new(data)),
            Statement::DropIndex {
                schema,
                name,
                if_exists,
            } => Box::new(DropIndexExecutor::new(schema, name, if_exists)),
            Statement::CreateSequence {
                schema,
                name,
                start,
                increment,
            } => Box::new(CreateSequenceExecutor::new(schema, name, start, increment)),
            Statement::CreateConstant {
                schema,
                name,
                value,
            } => Box::new(CreateConstantExecutor::new(schema, name, value)),
            Statement::CreateFunctionAlias {
                schema,
                name,
                target,
                deterministic,
            } => Box::new(CreateFunctionAliasExecutor::new(
                schema,
                name,
                target,
                deterministic,
            )),
            Statement::AlterRename {
                schema,
                object_type,
                old_name,
                new_name,
            } => Box::new(AlterRenameExecutor::new(
                schema,
                object_type,
                old_name,
                new_name,
            )),
            Statement::AlterTableAlterColumn(data) => {
                Box::new(AlterTableAlterColumnExecutor::new(data))
            }
            Statement::AlterTableAddConstraint(data) => {
                Box::new(AlterTableAddConstraintExecutor::new(data))
            }
            unsupported @ (Statement::TruncateTable { .. }
            | Statement::Dml(_)
            | Statement::Transaction(_)) => {
                return Err(ExecutionError::Unsupported(format!(
                    "statement type={}",
                    unsupported.type_name()
                )));
            }
        };
        Ok(executor)
    }

    /// Build and run the executor for `statement`
    pub fn execute(
        db: &Database,
        session: &Session,
        statement: Statement,
    ) -> Result<ExecutionOutcome, ExecutionError> {
        Self::new_executor(statement)?.execute(db, session)
    }
}
