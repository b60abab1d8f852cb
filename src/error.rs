//! Error type shared by every hazel-db module.

use may_postgres::Error as PostgresError;
use std::fmt;

/// hazel-db error type
#[derive(Debug)]
pub enum HazelError {
    /// Setup mistake that must be fixed by the caller (missing table binding,
    /// attaching one entity to two registries, unknown connection URL, ...)
    Configuration(String),
    /// Table asked for by name does not exist in the live schema
    TableNotFound(String),
    /// Column value could not be converted to or from its storage form
    Conversion(String),
    /// `PostgreSQL` error from `may_postgres`
    Database(PostgresError),
    /// Config file or environment could not be loaded
    Config(config::ConfigError),
}

impl fmt::Display for HazelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazelError::Configuration(s) => write!(f, "Configuration error: {s}"),
            HazelError::TableNotFound(table) => write!(f, "Table not found: {table}"),
            HazelError::Conversion(s) => write!(f, "Conversion error: {s}"),
            HazelError::Database(e) => write!(f, "PostgreSQL error: {e}"),
            HazelError::Config(e) => write!(f, "Config error: {e}"),
        }
    }
}

impl std::error::Error for HazelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HazelError::Database(e) => Some(e),
            HazelError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PostgresError> for HazelError {
    fn from(err: PostgresError) -> Self {
        HazelError::Database(err)
    }
}

impl From<config::ConfigError> for HazelError {
    fn from(err: config::ConfigError) -> Self {
        HazelError::Config(err)
    }
}

pub type Result<T> = std::result::Result<T, HazelError>;
