// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
use crate::catalog::{Constant, Database, FunctionAlias, ObjectType, Sequence};
use crate::exec::ddl_stmt::{schema_for_create, validate_name, DdlStatementExecutor};
use crate::exec::ExecutionError;
use crate::session::Session;

/// Executor for CREATE SEQUENCE statements
pub struct CreateSequenceExecutor {
    schema: String,
    name: String,
    start: i64,
    increment: i64,
}

impl CreateSequenceExecutor {
    pub fn new(schema: String, name: String, start: i64, increment: i64) -> Self {
        Self {
            schema,
            name,
            start,
            increment,
        }
    }
}

impl DdlStatementExecutor for CreateSequenceExecutor {
    fn describe(&self) -> String {
        format!("CREATE SEQUENCE {}.{}", self.schema, self.name)
    }

    fn execute_ddl_operation(
        &self,
        db: &Database,
        _session: &Session,
    ) -> Result<(String, usize), ExecutionError> {
        if self.increment == 0 {
            return Err(ExecutionError::InvalidStatement(
                "sequence increment cannot be 0".to_string(),
            ));
        }
        let Some(schema) = schema_for_create(db, &self.schema, ObjectType::Sequence, &self.name, false)? else {
            return Ok((String::new(), 0));
        };
        let sequence = Sequence::with_start(
            db.allocate_object_id(),
            schema.schema_ref(),
            self.name.clone(),
            self.start,
            self.increment,
        );
        db.add_schema_object(sequence.into())?;
        Ok((format!("Sequence '{}' created", self.name), 1))
    }
}

/// Executor for CREATE CONSTANT statements
pub struct CreateConstantExecutor {
    schema: String,
    name: String,
    value: String,
}

impl CreateConstantExecutor {
    pub fn new(schema: String, name: String, value: String) -> Self {
        Self {
            schema,
            name,
            value,
        }
    }
}

impl DdlStatementExecutor for CreateConstantExecutor {
    fn describe(&self) -> String {
        format!("CREATE CONSTANT {}.{}", self.schema, self.name)
    }

    fn execute_ddl_operation(
        &self,
        db: &Database,
        _session: &Session,
    ) -> Result<(String, usize), ExecutionError> {
        let Some(schema) = schema_for_create(db, &self.schema, ObjectType::Constant, &self.name, false)? else {
            return Ok((String::new(), 0));
        };
        let constant = Constant::new(
            db.allocate_object_id(),
            schema.schema_ref(),
            self.name.clone(),
            self.value.clone(),
        );
        db.add_schema_object(constant.into())?;
        Ok((format!("Constant '{}' created", self.name), 1))
    }
}

/// Executor for CREATE ALIAS statements
pub struct CreateFunctionAliasExecutor {
    schema: String,
    name: String,
    target: String,
    deterministic: bool,
}

impl CreateFunctionAliasExecutor {
    pub fn new(schema: String, name: String, target: String, deterministic: bool) -> Self {
        Self {
            schema,
            name,
            target,
            deterministic,
        }
    }
}

impl DdlStatementExecutor for CreateFunctionAliasExecutor {
    fn describe(&self) -> String {
        format!("CREATE ALIAS {}.{} FOR {}", self.schema, self.name, self.target)
    }

    fn execute_ddl_operation(
        &self,
        db: &Database,
        _session: &Session,
    ) -> Result<(String, usize), ExecutionError> {
        validate_name("function target", &self.target)?;
        let Some(schema) =
            schema_for_create(db, &self.schema, ObjectType::FunctionAlias, &self.name, false)?
        else {
            return Ok((String::new(), 0));
        };
        let alias = FunctionAlias::new(
            db.allocate_object_id(),
            schema.schema_ref(),
            self.name.clone(),
            self.target.clone(),
            self.deterministic,
        );
        db.add_schema_object(alias.into())?;
        Ok((format!("Function alias '{}' created", self.name), 1))
    }
}

/// Executor for ALTER ... RENAME TO statements
pub struct AlterRenameExecutor {
    schema: String,
    object_type: ObjectType,
    old_name: String,
    new_name: String,
}

impl AlterRenameExecutor {
    pub fn new(schema: String, object_type: ObjectType, old_name: String, new_name: String) -> Self {
        Self {
            schema,
            object_type,
            old_name,
            new_name,
        }
    }
}

impl DdlStatementExecutor for AlterRenameExecutor {
    fn describe(&self) -> String {
        format!(
            "ALTER {} {}.{} RENAME TO {}",
            self.object_type, self.schema, self.old_name, self.new_name
        )
    }

    fn execute_ddl_operation(
        &self,
        db: &Database,
        _session: &Session,
    ) -> Result<(String, usize), ExecutionError> {
        validate_name(&self.object_type.to_string(), &self.new_name)?;
        let schema = db.get_schema(&self.schema)?;
        let obj = schema.get_object(self.object_type, &self.old_name)?;
        db.rename_schema_object(&obj, &self.new_name)?;
        Ok((
            format!("Renamed '{}' to '{}'", self.old_name, self.new_name),
            1,
        ))
    }
}
