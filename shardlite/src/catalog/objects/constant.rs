// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! User defined constants

use crate::catalog::object::{ObjectBase, ObjectType, SchemaObject, SchemaRef};

#[derive(Debug)]
pub struct Constant {
    base: ObjectBase,
    value: String,
}

impl Constant {
    pub fn new(id: u32, schema: SchemaRef, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            base: ObjectBase::new(id, schema, name),
            value: value.into(),
        }
    }

    /// SQL literal text of the value
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl SchemaObject for Constant {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::Constant
    }
}
