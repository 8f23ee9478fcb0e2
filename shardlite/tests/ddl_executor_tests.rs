//! DDL statements through the executor factory

#[path = "testutils/mod.rs"]
mod testutils;

use shardlite::catalog::{IndexKind, ObjectType};
use shardlite::exec::{CreateIndexData, DmlKind, TransactionKind};
use shardlite::{CatalogError, ExecutionError, ExecutorFactory, Statement, StatementExecutor};
use testutils::test_fixture::TestFixture;

#[test]
fn test_unnamed_index_twice_gets_two_names() {
    let fixture = TestFixture::new();
    fixture.create_table("ORDERS", &[]);

    fixture.assert_succeeds(fixture.create_index_statement("ORDERS", None));
    fixture.assert_succeeds(fixture.create_index_statement("ORDERS", None));

    let names: Vec<String> = fixture
        .schema()
        .get_all_of(ObjectType::Index)
        .unwrap()
        .iter()
        .map(|i| i.name())
        .collect();
    assert_eq!(names.len(), 2);
    assert_ne!(names[0], names[1]);
    assert!(names.iter().all(|n| n.starts_with("INDEX_")));
    // committed names leave no reservation behind
    assert!(names.iter().all(|n| !fixture.schema().is_name_reserved(n)));
}

#[test]
fn test_primary_key_gets_its_own_prefix() {
    let fixture = TestFixture::new();
    fixture.create_table("ORDERS", &[]);
    fixture.assert_succeeds(Statement::CreateIndex(CreateIndexData {
        schema: fixture.schema_name().to_string(),
        table: "ORDERS".into(),
        columns: vec!["ID".into()],
        kind: IndexKind::PrimaryKey,
        ..Default::default()
    }));

    let indexes = fixture.schema().get_all_of(ObjectType::Index).unwrap();
    assert_eq!(indexes.len(), 1);
    assert!(indexes[0].name().starts_with("PRIMARY_KEY_"), "{}", indexes[0].name());
}

#[test]
fn test_unsupported_statements_are_rejected() {
    let fixture = TestFixture::new();
    for statement in [
        Statement::Dml(DmlKind::Insert),
        Statement::Dml(DmlKind::Select),
        Statement::Transaction(TransactionKind::Commit),
        Statement::TruncateTable {
            schema: fixture.schema_name().to_string(),
            name: "T".into(),
        },
    ] {
        let type_name = statement.type_name();
        let err = fixture.assert_fails(statement, "statement type=");
        assert_eq!(
            err,
            ExecutionError::Unsupported(format!("statement type={}", type_name))
        );
    }
}

#[test]
fn test_create_table_twice() {
    let fixture = TestFixture::new();
    fixture.create_table("T", &[]);
    fixture.assert_fails(fixture.create_table_statement("T", &[]), "already exists");

    let mut statement = fixture.create_table_statement("T", &[]);
    if let Statement::CreateTable(data) = &mut statement {
        data.if_not_exists = true;
    }
    assert_eq!(fixture.assert_succeeds(statement).affected, 0);
}

#[test]
fn test_create_table_with_unknown_reference() {
    let fixture = TestFixture::new();
    let err = fixture.assert_fails(fixture.create_table_statement("V", &["NOPE"]), "NOPE");
    assert!(matches!(
        err.catalog_error(),
        Some(CatalogError::NotFound { .. })
    ));
    assert!(fixture.schema().get_all().unwrap().is_empty());
}

#[test]
fn test_drop_table_with_dependent_fails() {
    let fixture = TestFixture::new();
    fixture.create_table("B", &[]);
    fixture.create_table("A", &["B"]);

    let drop_b = Statement::DropTable {
        schema: fixture.schema_name().to_string(),
        name: "B".into(),
        if_exists: false,
    };
    fixture.assert_fails(drop_b.clone(), "depends on it");

    fixture.assert_succeeds(Statement::DropTable {
        schema: fixture.schema_name().to_string(),
        name: "A".into(),
        if_exists: false,
    });
    fixture.assert_succeeds(drop_b);
    assert!(fixture.schema().get_all_tables_and_views().unwrap().is_empty());
}

#[test]
fn test_drop_missing_objects() {
    let fixture = TestFixture::new();
    let schema = fixture.schema_name().to_string();
    fixture.assert_fails(
        Statement::DropTable {
            schema: schema.clone(),
            name: "GHOST".into(),
            if_exists: false,
        },
        "GHOST",
    );
    let outcome = fixture.assert_succeeds(Statement::DropIndex {
        schema,
        name: "GHOST_IDX".into(),
        if_exists: true,
    });
    assert_eq!(outcome.affected, 0);
}

#[test]
fn test_rename_sequence() {
    let fixture = TestFixture::new();
    let schema_name = fixture.schema_name().to_string();
    fixture.assert_succeeds(Statement::CreateSequence {
        schema: schema_name.clone(),
        name: "S1".into(),
        start: 10,
        increment: 5,
    });
    fixture.assert_succeeds(Statement::AlterRename {
        schema: schema_name.clone(),
        object_type: ObjectType::Sequence,
        old_name: "S1".into(),
        new_name: "S2".into(),
    });

    let schema = fixture.schema();
    assert!(schema.find_sequence("S1").unwrap().is_none());
    let sequence = schema.get_sequence("S2").unwrap();
    assert_eq!(sequence.next_value(), 10);
    assert_eq!(sequence.next_value(), 15);

    // renaming onto itself is a user error at this level
    fixture.assert_fails(
        Statement::AlterRename {
            schema: schema_name,
            object_type: ObjectType::Sequence,
            old_name: "S2".into(),
            new_name: "S2".into(),
        },
        "already exists",
    );
}

#[test]
fn test_temp_table_and_index_stay_in_session() {
    let fixture = TestFixture::new();
    fixture.create_temp_table("SCRATCH");
    fixture.assert_succeeds(fixture.create_index_statement("SCRATCH", Some("SCRATCH_IDX")));

    let schema = fixture.schema();
    assert!(schema.get_all().unwrap().is_empty());
    assert!(schema
        .find_index(Some(fixture.session()), "SCRATCH_IDX")
        .unwrap()
        .is_some());

    fixture.assert_succeeds(Statement::DropTable {
        schema: fixture.schema_name().to_string(),
        name: "SCRATCH".into(),
        if_exists: false,
    });
    assert!(!fixture.session().has_local_temp_index("SCRATCH_IDX"));
}

#[test]
fn test_schema_lifecycle_statements() {
    let fixture = TestFixture::new();
    let outcome = fixture.assert_succeeds(Statement::CreateSchema {
        name: "SALES".into(),
        if_not_exists: false,
    });
    assert_eq!(outcome.affected, 1);
    fixture.assert_fails(
        Statement::CreateSchema {
            name: "SALES".into(),
            if_not_exists: false,
        },
        "already exists",
    );
    fixture.assert_fails(
        Statement::CreateSchema {
            name: "  ".into(),
            if_not_exists: false,
        },
        "cannot be empty",
    );

    let owner = fixture.db().get_schema("SALES").unwrap().owner().unwrap();
    assert_eq!(&owner, fixture.session().user());

    fixture.assert_succeeds(Statement::DropSchema {
        name: "SALES".into(),
        if_exists: false,
    });
    fixture.assert_fails(
        Statement::DropSchema {
            name: "PUBLIC".into(),
            if_exists: false,
        },
        "system schema",
    );
}

#[test]
fn test_executor_description() {
    let executor = ExecutorFactory::new_executor(Statement::DropIndex {
        schema: "APP".into(),
        name: "I".into(),
        if_exists: false,
    })
    .unwrap();
    assert_eq!(executor.operation_description(), "DROP INDEX APP.I");
}
