//! Read-only discovery of the live schema.
//!
//! The sanity checker only needs two questions answered: which tables exist,
//! and which columns a given table has. [`StaticSchema`] answers them from an
//! in-memory snapshot, [`PostgresIntrospector`] from `information_schema`.

mod postgres;
mod static_schema;

pub use postgres::PostgresIntrospector;
pub use static_schema::StaticSchema;

use crate::error::Result;
use std::collections::BTreeSet;

pub trait SchemaIntrospector {
    /// Names of all tables in the inspected schema.
    fn list_tables(&self) -> Result<BTreeSet<String>>;

    /// Names of the columns of `table`.
    ///
    /// # Errors
    ///
    /// Returns `HazelError::TableNotFound` if `table` does not exist.
    fn list_columns(&self, table: &str) -> Result<BTreeSet<String>>;
}
