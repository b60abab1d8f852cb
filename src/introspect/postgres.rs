use super::SchemaIntrospector;
use crate::error::{HazelError, Result};
use may_postgres::Client;
use std::collections::BTreeSet;

const LIST_TABLES_SQL: &str = "SELECT table_name::text FROM information_schema.tables \
     WHERE table_schema = $1 AND table_type = 'BASE TABLE'";

const LIST_COLUMNS_SQL: &str = "SELECT column_name::text FROM information_schema.columns \
     WHERE table_schema = $1 AND table_name = $2";

const TABLE_EXISTS_SQL: &str = "SELECT 1 FROM information_schema.tables \
     WHERE table_schema = $1 AND table_name = $2";

/// Introspects one PostgreSQL schema through `information_schema`
///
/// Every call queries the database; nothing is cached.
pub struct PostgresIntrospector<'a> {
    client: &'a Client,
    schema: String,
}

impl<'a> PostgresIntrospector<'a> {
    pub fn new(client: &'a Client, schema: impl Into<String>) -> Self {
        Self {
            client,
            schema: schema.into(),
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }
}

impl SchemaIntrospector for PostgresIntrospector<'_> {
    fn list_tables(&self) -> Result<BTreeSet<String>> {
        let rows = self.client.query(LIST_TABLES_SQL, &[&self.schema])?;
        Ok(rows.iter().map(|row| row.get::<_, String>(0)).collect())
    }

    fn list_columns(&self, table: &str) -> Result<BTreeSet<String>> {
        let rows = self.client.query(LIST_COLUMNS_SQL, &[&self.schema, &table])?;
        if rows.is_empty() {
            // A table without columns is legal, so confirm it is really absent
            let exists = self.client.query(TABLE_EXISTS_SQL, &[&self.schema, &table])?;
            if exists.is_empty() {
                return Err(HazelError::TableNotFound(format!("{}.{}", self.schema, table)));
            }
        }
        Ok(rows.iter().map(|row| row.get::<_, String>(0)).collect())
    }
}
