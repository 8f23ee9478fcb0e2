// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Function aliases

use crate::catalog::object::{ObjectBase, ObjectType, SchemaObject, SchemaRef};

/// A SQL-callable name bound to an implementation target
#[derive(Debug)]
pub struct FunctionAlias {
    base: ObjectBase,
    target: String,
    deterministic: bool,
}

impl FunctionAlias {
    pub fn new(
        id: u32,
        schema: SchemaRef,
        name: impl Into<String>,
        target: impl Into<String>,
        deterministic: bool,
    ) -> Self {
        Self {
            base: ObjectBase::new(id, schema, name),
            target: target.into(),
            deterministic,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_deterministic(&self) -> bool {
        self.deterministic
    }
}

impl SchemaObject for FunctionAlias {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::FunctionAlias
    }
}
