// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
pub mod alter_table;
pub mod create_schema;
pub mod ddl_statement_base;
pub mod drop_schema;
pub mod index_operations;
pub mod object_operations;
pub mod table_operations;

pub use alter_table::*;
pub use create_schema::*;
pub use ddl_statement_base::*;
pub use drop_schema::*;
pub use index_operations::*;
pub use object_operations::*;
pub use table_operations::*;
