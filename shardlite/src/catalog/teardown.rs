// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Dependency-ordered removal of everything a schema owns
//!
//! Tables and views are dropped in topological order of their
//! dependencies, so a table is only removed once nothing in the schema
//! reads from it any more. The order is computed before the first removal:
//! a dependency cycle, or a dependent living in another schema, fails the
//! teardown with nothing removed.

use super::error::{CatalogError, CatalogResult};
use super::object::{ObjectType, SchemaObject, SchemaObjectRef};
use super::objects::Table;
use super::schema::Schema;
use super::traits::CatalogHost;
use crate::session::Session;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use std::sync::Arc;

/// Object kinds drained after tables and views, in this order. They do
/// not depend on each other.
const TRAILING_TYPES: [ObjectType; 4] = [
    ObjectType::Index,
    ObjectType::Sequence,
    ObjectType::Constant,
    ObjectType::FunctionAlias,
];

pub(crate) fn remove_children_and_resources(
    schema: &Schema,
    host: &dyn CatalogHost,
    session: Option<&Session>,
) -> CatalogResult<()> {
    let order = table_removal_order(schema, host)?;
    log::info!(
        "schema {}: dropping {} tables and views",
        schema.name(),
        order.len()
    );

    for table in order {
        let obj = SchemaObjectRef::Table(table);
        // dropping an earlier table may have taken this one with it
        if !schema.contains(&obj)? {
            continue;
        }
        remove_through_host(schema, host, session, &obj)?;
    }

    for object_type in TRAILING_TYPES {
        while let Some(obj) = schema.first_of(object_type)? {
            remove_through_host(schema, host, session, &obj)?;
        }
    }

    if !schema.is_empty() {
        return Err(CatalogError::internal(format!(
            "schema {} still holds objects after teardown",
            schema.name()
        )));
    }
    schema.invalidate();
    log::info!("schema {} removed", schema.name());
    Ok(())
}

fn remove_through_host(
    schema: &Schema,
    host: &dyn CatalogHost,
    session: Option<&Session>,
    obj: &SchemaObjectRef,
) -> CatalogResult<()> {
    host.remove_object(session, obj)?;
    if schema.contains(obj)? {
        return Err(CatalogError::internal(format!(
            "{} \"{}\" still present in schema {} after removal",
            obj.object_type(),
            obj.name(),
            schema.name()
        )));
    }
    Ok(())
}

/// Tables and views of `schema`, every dependent before its dependency
fn table_removal_order(schema: &Schema, host: &dyn CatalogHost) -> CatalogResult<Vec<Arc<Table>>> {
    let tables = schema.get_all_tables_and_views()?;
    let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(tables.len(), 0);
    let nodes: Vec<NodeIndex> = (0..tables.len()).map(|i| graph.add_node(i)).collect();

    for (i, table) in tables.iter().enumerate() {
        if !host.has_dependents(table) {
            continue;
        }
        for dependent in host.dependents_of(table) {
            if Arc::ptr_eq(&dependent, table) {
                continue;
            }
            match tables.iter().position(|t| Arc::ptr_eq(t, &dependent)) {
                Some(j) => {
                    graph.add_edge(nodes[j], nodes[i], ());
                }
                None => {
                    log::warn!(
                        "schema {}: {} is still used by {}",
                        schema.name(),
                        table.name(),
                        dependent.name()
                    );
                    return Err(CatalogError::CannotDrop {
                        name: table.name(),
                        dependent: dependent.name(),
                    });
                }
            }
        }
    }

    match toposort(&graph, None) {
        Ok(order) => Ok(order
            .into_iter()
            .map(|node| Arc::clone(&tables[graph[node]]))
            .collect()),
        Err(cycle) => {
            let start = cycle.node_id();
            let component = tarjan_scc(&graph)
                .into_iter()
                .find(|scc| scc.contains(&start))
                .unwrap_or_else(|| vec![start]);
            let mut names: Vec<String> = component
                .into_iter()
                .map(|node| tables[graph[node]].name())
                .collect();
            names.sort();
            log::warn!(
                "schema {}: dependency cycle between {}",
                schema.name(),
                names.join(", ")
            );
            Err(CatalogError::DependencyCycle(names))
        }
    }
}
