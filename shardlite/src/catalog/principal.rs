// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Users that own schemas

use serde::{Deserialize, Serialize};

/// A database user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub admin: bool,
}

impl User {
    pub fn new(id: u32, name: impl Into<String>, admin: bool) -> Self {
        Self {
            id,
            name: name.into(),
            admin,
        }
    }

    /// Lightweight handle used for ownership
    pub fn principal(&self) -> PrincipalRef {
        PrincipalRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Non-owning reference to a user, held by schemas and sessions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalRef {
    pub id: u32,
    pub name: String,
}
