// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Parsed statements handed to the executor factory
//!
//! Parsing happens upstream; this is the already classified form. Only the
//! DDL subset carries data, the remaining kinds are recognised so they can
//! be rejected with a precise message.

use crate::catalog::{Column, CreateTableData, IndexKind, ObjectType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// CREATE INDEX. Without a name the index gets an implicit unique one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateIndexData {
    pub schema: String,
    pub table: String,
    pub index_name: Option<String>,
    pub columns: Vec<String>,
    pub kind: IndexKind,
    pub if_not_exists: bool,
}

/// One ALTER TABLE column change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlterColumnAction {
    Add(Column),
    Drop(String),
    ChangeType { column: String, data_type: String },
    SetNullable { column: String, nullable: bool },
    SetDefault {
        column: String,
        expression: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlterColumnData {
    pub schema: String,
    pub table: String,
    pub action: AlterColumnAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    Referential {
        ref_table: String,
        ref_columns: Vec<String>,
    },
    Check(String),
}

/// ALTER TABLE ... ADD CONSTRAINT. Key constraints are backed by an index
/// with an implicit name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddConstraintData {
    pub schema: String,
    pub table: String,
    pub constraint_name: Option<String>,
    pub kind: ConstraintKind,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DmlKind {
    Insert,
    Update,
    Delete,
    Merge,
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Begin,
    Commit,
    Rollback,
    SetAutoCommit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Statement {
    CreateSchema {
        name: String,
        if_not_exists: bool,
    },
    DropSchema {
        name: String,
        if_exists: bool,
    },
    CreateTable(CreateTableData),
    DropTable {
        schema: String,
        name: String,
        if_exists: bool,
    },
    CreateIndex(CreateIndexData),
    DropIndex {
        schema: String,
        name: String,
        if_exists: bool,
    },
    CreateSequence {
        schema: String,
        name: String,
        start: i64,
        increment: i64,
    },
    CreateConstant {
        schema: String,
        name: String,
        value: String,
    },
    CreateFunctionAlias {
        schema: String,
        name: String,
        target: String,
        deterministic: bool,
    },
    AlterRename {
        schema: String,
        object_type: ObjectType,
        old_name: String,
        new_name: String,
    },
    AlterTableAlterColumn(AlterColumnData),
    AlterTableAddConstraint(AddConstraintData),
    TruncateTable {
        schema: String,
        name: String,
    },
    Dml(DmlKind),
    Transaction(TransactionKind),
}

impl Statement {
    /// Upper-case statement type, as used in messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Statement::CreateSchema { .. } => "CREATE SCHEMA",
            Statement::DropSchema { .. } => "DROP SCHEMA",
            Statement::CreateTable(_) => "CREATE TABLE",
            Statement::DropTable { .. } => "DROP TABLE",
            Statement::CreateIndex(_) => "CREATE INDEX",
            Statement::DropIndex { .. } => "DROP INDEX",
            Statement::CreateSequence { .. } => "CREATE SEQUENCE",
            Statement::CreateConstant { .. } => "CREATE CONSTANT",
            Statement::CreateFunctionAlias { .. } => "CREATE ALIAS",
            Statement::AlterRename { .. } => "ALTER RENAME",
            Statement::AlterTableAlterColumn(data) => match data.action {
                AlterColumnAction::Add(_) => "ALTER TABLE ADD COLUMN",
                AlterColumnAction::Drop(_) => "ALTER TABLE DROP COLUMN",
                AlterColumnAction::ChangeType { .. } => "ALTER TABLE ALTER COLUMN TYPE",
                AlterColumnAction::SetNullable { nullable: true, .. } => {
                    "ALTER TABLE ALTER COLUMN NULL"
                }
                AlterColumnAction::SetNullable { nullable: false, .. } => {
                    "ALTER TABLE ALTER COLUMN NOT NULL"
                }
                AlterColumnAction::SetDefault { .. } => "ALTER TABLE ALTER COLUMN DEFAULT",
            },
            Statement::AlterTableAddConstraint(data) => match data.kind {
                ConstraintKind::PrimaryKey => "ALTER TABLE ADD PRIMARY KEY",
                ConstraintKind::Unique => "ALTER TABLE ADD UNIQUE",
                ConstraintKind::Referential { .. } => "ALTER TABLE ADD FOREIGN KEY",
                ConstraintKind::Check(_) => "ALTER TABLE ADD CHECK",
            },
            Statement::TruncateTable { .. } => "TRUNCATE TABLE",
            Statement::Dml(DmlKind::Insert) => "INSERT",
            Statement::Dml(DmlKind::Update) => "UPDATE",
            Statement::Dml(DmlKind::Delete) => "DELETE",
            Statement::Dml(DmlKind::Merge) => "MERGE",
            Statement::Dml(DmlKind::Select) => "SELECT",
            Statement::Transaction(TransactionKind::Begin) => "BEGIN",
            Statement::Transaction(TransactionKind::Commit) => "COMMIT",
            Statement::Transaction(TransactionKind::Rollback) => "ROLLBACK",
            Statement::Transaction(TransactionKind::SetAutoCommit) => "SET AUTOCOMMIT",
        }
    }

    pub fn is_ddl(&self) -> bool {
        !matches!(self, Statement::Dml(_) | Statement::Transaction(_))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}
