//! Integration tests for `PostgresIntrospector` against a live database
//!
//! Note: These tests require a running PostgreSQL database. Set TEST_DATABASE_URL
//! and run with `--ignored`.

#![allow(clippy::expect_used)] // Test code - expect is acceptable

use hazel_db::{
    create_session_factory, get_engine, HazelError, SchemaIntrospector, Session,
};
use std::collections::HashMap;

fn open_session() -> Session {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let settings = HashMap::from([("sqlalchemy.url".to_string(), url)]);
    let engine = get_engine(&settings, "sqlalchemy.").expect("Failed to create engine");
    create_session_factory(engine)
        .open()
        .expect("Failed to open session")
}

#[test]
#[ignore = "requires PostgreSQL"]
fn test_table_without_columns_lists_empty() {
    let session = open_session();
    session
        .client()
        .batch_execute("CREATE TABLE IF NOT EXISTS hazel_no_columns ()")
        .expect("Failed to create table");

    let columns = session
        .introspector()
        .list_columns("hazel_no_columns")
        .expect("Zero-column table should be found");
    assert!(columns.is_empty());

    session
        .client()
        .batch_execute("DROP TABLE hazel_no_columns")
        .expect("Failed to drop table");
}

#[test]
#[ignore = "requires PostgreSQL"]
fn test_absent_table_is_table_not_found() {
    let session = open_session();
    session
        .client()
        .batch_execute("DROP TABLE IF EXISTS hazel_never_created")
        .expect("Failed to drop table");

    match session.introspector().list_columns("hazel_never_created") {
        Err(HazelError::TableNotFound(name)) => {
            assert_eq!(name, "public.hazel_never_created");
        }
        other => panic!("Expected TableNotFound, got {other:?}"),
    }
}

#[test]
#[ignore = "requires PostgreSQL"]
fn test_created_table_is_listed_with_columns() {
    let session = open_session();
    session
        .client()
        .batch_execute("CREATE TABLE IF NOT EXISTS hazel_listed (id integer, title text)")
        .expect("Failed to create table");

    let introspector = session.introspector();
    assert!(introspector
        .list_tables()
        .expect("Failed to list tables")
        .contains("hazel_listed"));
    let columns = introspector
        .list_columns("hazel_listed")
        .expect("Failed to list columns");
    assert_eq!(
        columns.into_iter().collect::<Vec<_>>(),
        vec!["id".to_string(), "title".to_string()]
    );

    session
        .client()
        .batch_execute("DROP TABLE hazel_listed")
        .expect("Failed to drop table");
}
