// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Concrete schema object kinds

pub mod constant;
pub mod function;
pub mod index;
pub mod sequence;
pub mod table;

pub use constant::Constant;
pub use function::FunctionAlias;
pub use index::{Index, IndexKind};
pub use sequence::Sequence;
pub use table::{Column, CreateTableData, Table, TableKind, TemporaryScope};
