//! Test fixture for ShardLite integration tests

#![allow(dead_code)]

use shardlite::catalog::{Column, CreateTableData, Schema, TemporaryScope};
use shardlite::exec::CreateIndexData;
use shardlite::{
    Database, DatabaseConfig, ExecutionError, ExecutionOutcome, ExecutorFactory, Session,
    SessionManager, Statement,
};
use std::sync::Arc;

/// Test fixture with an isolated database instance
pub struct TestFixture {
    db: Arc<Database>,
    sessions: SessionManager,
    session: Arc<Session>,
    schema_name: String,
}

impl TestFixture {
    /// Create a fixture with the default configuration
    pub fn new() -> Self {
        Self::with_config(DatabaseConfig::default())
    }

    /// Create a fixture whose database compares names case-insensitively
    pub fn ignore_case() -> Self {
        Self::with_config(DatabaseConfig::default().with_ignore_case(true))
    }

    pub fn with_config(config: DatabaseConfig) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let db = Arc::new(Database::new(config));
        let sessions = SessionManager::new(db.ignore_case());
        let session = sessions.create_session(db.admin().clone());

        // Use a unique schema name for test isolation
        let schema_name = format!("TEST_SCHEMA_{}", fastrand::u64(..));
        db.create_schema(&schema_name, db.admin().clone())
            .expect("Failed to create test schema");

        TestFixture {
            db,
            sessions,
            session,
            schema_name,
        }
    }

    pub fn db(&self) -> &Arc<Database> {
        &self.db
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Open another session as the admin user
    pub fn new_session(&self) -> Arc<Session> {
        self.sessions.create_session(self.db.admin().clone())
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn schema(&self) -> Arc<Schema> {
        self.db
            .get_schema(&self.schema_name)
            .expect("Test schema is missing")
    }

    /// Execute a statement in the fixture's session
    pub fn execute(&self, statement: Statement) -> Result<ExecutionOutcome, ExecutionError> {
        ExecutorFactory::execute(&self.db, &self.session, statement)
    }

    pub fn assert_succeeds(&self, statement: Statement) -> ExecutionOutcome {
        let description = statement.to_string();
        match self.execute(statement) {
            Ok(outcome) => outcome,
            Err(e) => panic!("{} should succeed but failed: {}", description, e),
        }
    }

    pub fn assert_fails(&self, statement: Statement, expected: &str) -> ExecutionError {
        let description = statement.to_string();
        match self.execute(statement) {
            Ok(outcome) => panic!("{} should fail but returned {:?}", description, outcome),
            Err(e) => {
                assert!(
                    e.to_string().contains(expected),
                    "error '{}' does not mention '{}'",
                    e,
                    expected
                );
                e
            }
        }
    }

    pub fn create_table_statement(&self, name: &str, references: &[&str]) -> Statement {
        Statement::CreateTable(CreateTableData {
            schema: self.schema_name.clone(),
            table_name: name.to_string(),
            columns: vec![Column::new("ID", "INT")],
            references: references.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        })
    }

    /// Create a table reading from `references`
    pub fn create_table(&self, name: &str, references: &[&str]) {
        self.assert_succeeds(self.create_table_statement(name, references));
    }

    pub fn create_temp_table(&self, name: &str) {
        self.assert_succeeds(Statement::CreateTable(CreateTableData {
            schema: self.schema_name.clone(),
            table_name: name.to_string(),
            columns: vec![Column::new("ID", "INT")],
            scope: TemporaryScope::LocalTemporary,
            ..Default::default()
        }));
    }

    pub fn create_index_statement(&self, table: &str, name: Option<&str>) -> Statement {
        Statement::CreateIndex(CreateIndexData {
            schema: self.schema_name.clone(),
            table: table.to_string(),
            index_name: name.map(str::to_string),
            columns: vec!["ID".to_string()],
            ..Default::default()
        })
    }
}
