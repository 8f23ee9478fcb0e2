//! Dropping whole schemas

#[path = "testutils/mod.rs"]
mod testutils;

use shardlite::catalog::{Column, CreateTableData, IndexKind, ObjectType, Table, TableKind};
use shardlite::exec::CreateIndexData;
use shardlite::{CatalogError, SchemaObject, SchemaState, Statement};
use testutils::test_fixture::TestFixture;

#[test]
fn test_drop_schema_empties_every_namespace() {
    let fixture = TestFixture::new();
    let schema_name = fixture.schema_name().to_string();
    fixture.create_table("B", &[]);
    fixture.create_table("A", &["B"]);
    fixture.assert_succeeds(fixture.create_index_statement("A", None));
    fixture.assert_succeeds(Statement::CreateSequence {
        schema: schema_name.clone(),
        name: "SEQ".into(),
        start: 1,
        increment: 1,
    });
    fixture.assert_succeeds(Statement::CreateConstant {
        schema: schema_name.clone(),
        name: "ANSWER".into(),
        value: "42".into(),
    });
    fixture.assert_succeeds(Statement::CreateFunctionAlias {
        schema: schema_name.clone(),
        name: "MY_ABS".into(),
        target: "java.lang.Math.abs".into(),
        deterministic: true,
    });

    let schema = fixture.schema();
    let table_a = schema.get_table_or_view(None, "A").unwrap();
    let outcome = fixture.assert_succeeds(Statement::DropSchema {
        name: schema_name.clone(),
        if_exists: false,
    });
    assert_eq!(outcome.affected, 7);

    assert_eq!(schema.state(), SchemaState::Invalid);
    assert!(schema.owner().is_none());
    assert!(!table_a.is_valid());
    assert!(fixture.db().find_schema(&schema_name).is_none());
    for object_type in ObjectType::ALL {
        assert_eq!(
            schema.get_all_of(object_type).unwrap_err(),
            CatalogError::SchemaInvalid(schema_name.clone())
        );
    }
}

#[test]
fn test_calls_on_invalid_schema_fail() {
    let fixture = TestFixture::new();
    let schema = fixture.schema();
    fixture.db().drop_schema(None, fixture.schema_name()).unwrap();

    let invalid = CatalogError::SchemaInvalid(fixture.schema_name().to_string());
    assert_eq!(schema.find_table_or_view(None, "T").unwrap_err(), invalid);
    assert_eq!(schema.get_sequence("S").unwrap_err(), invalid);
    assert!(schema.unique_name("T", ObjectType::Index, "IDX_").is_err());
    assert_eq!(
        schema
            .remove_children_and_resources(fixture.db().as_ref(), None)
            .unwrap_err(),
        invalid
    );
}

#[test]
fn test_dependency_cycle_is_reported_without_removal() {
    let fixture = TestFixture::new();
    let schema = fixture.schema();
    let db = fixture.db();
    fixture.create_table("C", &[]);

    let (id_a, id_b) = (db.allocate_object_id(), db.allocate_object_id());
    let a = Table::new(id_a, schema.schema_ref(), "A").with_reference_ids(vec![id_b]);
    let b = Table::new(id_b, schema.schema_ref(), "B").with_reference_ids(vec![id_a]);
    db.add_schema_object(a.into()).unwrap();
    db.add_schema_object(b.into()).unwrap();

    let err = db.drop_schema(None, fixture.schema_name()).unwrap_err();
    assert_eq!(err, CatalogError::DependencyCycle(vec!["A".into(), "B".into()]));
    assert!(err.to_string().contains("dependency cycle"));

    // nothing was removed and the schema is still usable
    assert_eq!(schema.get_all_tables_and_views().unwrap().len(), 3);
    assert!(schema.is_valid());
    assert!(db.find_schema(fixture.schema_name()).is_some());
}

#[test]
fn test_dependents_dropped_before_their_dependencies() {
    let fixture = TestFixture::new();
    fixture.create_table("BASE", &[]);
    fixture.create_table("MID", &["BASE"]);
    fixture.create_table("TOP", &["MID", "BASE"]);

    // removing BASE directly is refused
    let base = fixture.schema().get_table_or_view(None, "BASE").unwrap();
    assert!(matches!(
        fixture.db().remove_schema_object(None, &base.into()),
        Err(CatalogError::CannotDrop { .. })
    ));

    // teardown orders the drops so the same check never trips
    fixture.db().drop_schema(None, fixture.schema_name()).unwrap();
}

#[test]
fn test_dependent_in_other_schema_blocks_drop() {
    let fixture = TestFixture::new();
    fixture.create_table("SOURCE", &[]);
    let schema = fixture.schema();
    let source = schema.get_table_or_view(None, "SOURCE").unwrap();

    let other = fixture
        .db()
        .create_schema("REPORTING", fixture.db().admin().clone())
        .unwrap();
    let report = Table::new(fixture.db().allocate_object_id(), other.schema_ref(), "REPORT")
        .with_reference(&source);
    fixture.db().add_schema_object(report.into()).unwrap();

    assert_eq!(
        fixture.db().drop_schema(None, fixture.schema_name()),
        Err(CatalogError::CannotDrop {
            name: "SOURCE".into(),
            dependent: "REPORT".into()
        })
    );
    assert!(schema.find_table_or_view(None, "SOURCE").unwrap().is_some());

    // once the dependent is gone the drop goes through
    fixture.db().drop_schema(None, "REPORTING").unwrap();
    fixture.db().drop_schema(None, fixture.schema_name()).unwrap();
}

#[test]
fn test_view_over_table_is_dropped_first() {
    let fixture = TestFixture::new();
    fixture.create_table("ORDERS", &[]);
    fixture.assert_succeeds(Statement::CreateTable(CreateTableData {
        schema: fixture.schema_name().to_string(),
        table_name: "ORDER_TOTALS".into(),
        columns: vec![Column::computed("TOTAL", "DECIMAL", "SUM(ORDERS.AMOUNT)")],
        kind: TableKind::View,
        references: vec!["ORDERS".into()],
        ..Default::default()
    }));
    fixture.assert_succeeds(Statement::CreateIndex(CreateIndexData {
        schema: fixture.schema_name().to_string(),
        table: "ORDERS".into(),
        index_name: Some("ORDERS_PK".into()),
        columns: vec!["ID".into()],
        kind: IndexKind::PrimaryKey,
        if_not_exists: false,
    }));

    let schema = fixture.schema();
    let view = schema.get_table_or_view(None, "ORDER_TOTALS").unwrap();
    assert!(view.is_view());

    fixture.db().drop_schema(None, fixture.schema_name()).unwrap();
    assert!(!view.is_valid());
    assert!(!schema.is_valid());
}
