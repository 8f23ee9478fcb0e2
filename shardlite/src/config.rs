// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Database configuration

use serde::{Deserialize, Serialize};

/// Settings a [`crate::catalog::Database`] is bootstrapped with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Logical database name
    pub name: String,

    /// Compare object names case-insensitively. Names are stored upper case
    /// as keys while objects keep their own spelling.
    pub ignore_case: bool,

    /// Default schema, created at bootstrap
    pub main_schema: String,

    /// Metadata schema, created at bootstrap
    pub info_schema: String,

    /// Administrator owning both system schemas
    pub admin_user: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: "SHARDLITE".to_string(),
            ignore_case: false,
            main_schema: "PUBLIC".to_string(),
            info_schema: "INFORMATION_SCHEMA".to_string(),
            admin_user: "SA".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Parse a JSON document. Missing fields take their default value.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }
}
