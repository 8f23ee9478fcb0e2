// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Sequence metadata

use crate::catalog::object::{ObjectBase, ObjectType, SchemaObject, SchemaRef};
use parking_lot::Mutex;

/// A named number generator
#[derive(Debug)]
pub struct Sequence {
    base: ObjectBase,
    increment: i64,
    next: Mutex<i64>,
}

impl Sequence {
    pub fn new(id: u32, schema: SchemaRef, name: impl Into<String>) -> Self {
        Self::with_start(id, schema, name, 1, 1)
    }

    pub fn with_start(
        id: u32,
        schema: SchemaRef,
        name: impl Into<String>,
        start: i64,
        increment: i64,
    ) -> Self {
        Self {
            base: ObjectBase::new(id, schema, name),
            increment,
            next: Mutex::new(start),
        }
    }

    pub fn increment(&self) -> i64 {
        self.increment
    }

    /// Return the current value and advance by the increment
    pub fn next_value(&self) -> i64 {
        let mut next = self.next.lock();
        let value = *next;
        *next = next.wrapping_add(self.increment);
        value
    }
}

impl SchemaObject for Sequence {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::Sequence
    }
}
