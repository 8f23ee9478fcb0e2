// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the schema catalog

use super::object::ObjectType;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A caller broke a catalog invariant. Never caused by user input.
    #[error("Internal error: {0}")]
    InternalInvariant(String),

    #[error("{object_type} \"{name}\" not found")]
    NotFound {
        object_type: ObjectType,
        name: String,
    },

    #[error("{object_type} \"{name}\" already exists")]
    AlreadyExists {
        object_type: ObjectType,
        name: String,
    },

    #[error("Schema \"{0}\" is no longer valid")]
    SchemaInvalid(String),

    #[error("Schema \"{0}\" not found")]
    SchemaNotFound(String),

    #[error("Schema \"{0}\" already exists")]
    DuplicateSchema(String),

    #[error("User \"{0}\" already exists")]
    DuplicateUser(String),

    #[error("User \"{0}\" not found")]
    UserNotFound(String),

    #[error("Column \"{column}\" already exists in table \"{table}\"")]
    DuplicateColumn { table: String, column: String },

    #[error("Column \"{column}\" not found in table \"{table}\"")]
    ColumnNotFound { table: String, column: String },

    #[error("Cannot drop system schema \"{0}\"")]
    SystemSchema(String),

    #[error("Cannot drop \"{name}\" because \"{dependent}\" depends on it")]
    CannotDrop { name: String, dependent: String },

    #[error("Cannot drop: dependency cycle between tables {}", .0.join(", "))]
    DependencyCycle(Vec<String>),

    #[error("Feature not supported: {0}")]
    Unsupported(String),
}

impl CatalogError {
    pub(crate) fn internal(message: impl Into<String>) -> Self {
        CatalogError::InternalInvariant(message.into())
    }

    pub(crate) fn not_found(object_type: ObjectType, name: &str) -> Self {
        CatalogError::NotFound {
            object_type,
            name: name.to_string(),
        }
    }

    /// True for errors that signal a caller bug rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(self, CatalogError::InternalInvariant(_))
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_carries_name() {
        let err = CatalogError::not_found(ObjectType::TableOrView, "missing");
        assert_eq!(err.to_string(), "table or view \"missing\" not found");
        assert!(!err.is_internal());
    }

    #[test]
    fn test_cycle_message_lists_tables() {
        let err = CatalogError::DependencyCycle(vec!["A".into(), "B".into()]);
        assert_eq!(
            err.to_string(),
            "Cannot drop: dependency cycle between tables A, B"
        );
    }
}
