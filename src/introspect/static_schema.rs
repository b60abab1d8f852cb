use super::SchemaIntrospector;
use crate::error::{HazelError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// In-memory schema snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSchema {
    tables: BTreeMap<String, BTreeSet<String>>,
}

impl StaticSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a table with the given columns.
    pub fn table<I, S>(mut self, name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables
            .insert(name.into(), columns.into_iter().map(Into::into).collect());
        self
    }
}

impl SchemaIntrospector for StaticSchema {
    fn list_tables(&self) -> Result<BTreeSet<String>> {
        Ok(self.tables.keys().cloned().collect())
    }

    fn list_columns(&self, table: &str) -> Result<BTreeSet<String>> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| HazelError::TableNotFound(table.to_string()))
    }
}
