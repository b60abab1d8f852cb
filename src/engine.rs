//! Engine and session helpers.
//!
//! An [`Engine`] is a resolved connection target: URL, [`Dialect`] and the
//! per-dialect [`EngineOptions`]. Nothing connects until a [`Session`] is
//! opened from a [`SessionFactory`].

use crate::config::DatabaseConfig;
use crate::error::{HazelError, Result};
use crate::introspect::PostgresIntrospector;
use crate::registry::Registry;
use crate::types::uuid::{HexCharUuid, NativeUuid, UuidStorage};
use may_postgres::Client;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

static NATIVE_UUID: NativeUuid = NativeUuid;
static HEX_CHAR_UUID: HexCharUuid = HexCharUuid;

/// Backing-store family, detected from the connection URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

impl Dialect {
    /// Detect the dialect from a connection URL.
    pub fn from_url(url: &str) -> Result<Self> {
        if url.contains("sqlite") {
            Ok(Dialect::Sqlite)
        } else if url.contains("postgres") {
            Ok(Dialect::Postgres)
        } else {
            Err(HazelError::Configuration(format!(
                "Unknown connection URL: {url}"
            )))
        }
    }

    /// UUID storage strategy for this dialect.
    ///
    /// PostgreSQL stores UUIDs natively; everything else uses `CHAR(32)` hex.
    pub fn uuid_storage(self) -> &'static dyn UuidStorage {
        match self {
            Dialect::Postgres => &NATIVE_UUID,
            Dialect::Sqlite => &HEX_CHAR_UUID,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Postgres => "postgresql",
            Dialect::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Transaction isolation level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationLevel {
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

impl IsolationLevel {
    /// Convert to SQL syntax
    pub fn to_sql(self) -> &'static str {
        match self {
            IsolationLevel::ReadCommitted => "READ COMMITTED",
            IsolationLevel::RepeatableRead => "REPEATABLE READ",
            IsolationLevel::Serializable => "SERIALIZABLE",
        }
    }
}

/// Options applied to every session opened on an engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    pub isolation_level: IsolationLevel,
    pub client_encoding: Option<String>,
    pub timezone: Option<String>,
}

impl EngineOptions {
    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Sqlite => Self {
                isolation_level: IsolationLevel::Serializable,
                client_encoding: None,
                timezone: None,
            },
            Dialect::Postgres => Self {
                isolation_level: IsolationLevel::Serializable,
                client_encoding: Some("utf-8".to_string()),
                timezone: Some("utc".to_string()),
            },
        }
    }

    /// Statements run right after connecting.
    pub fn session_statements(&self) -> Vec<String> {
        let mut statements = vec![format!(
            "SET SESSION CHARACTERISTICS AS TRANSACTION ISOLATION LEVEL {}",
            self.isolation_level.to_sql()
        )];
        if let Some(encoding) = &self.client_encoding {
            statements.push(format!("SET client_encoding TO '{encoding}'"));
        }
        if let Some(timezone) = &self.timezone {
            statements.push(format!("SET TIME ZONE '{timezone}'"));
        }
        statements
    }
}

/// A resolved connection target
#[derive(Debug, Clone)]
pub struct Engine {
    dialect: Dialect,
    options: EngineOptions,
    config: DatabaseConfig,
}

impl Engine {
    pub fn from_config(config: DatabaseConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(HazelError::Configuration(
                "Connection URL cannot be empty".to_string(),
            ));
        }
        let dialect = Dialect::from_url(&config.url)?;
        let options = EngineOptions::for_dialect(dialect);
        log::info!("Created {} engine", dialect);
        Ok(Self {
            dialect,
            options,
            config,
        })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Open a live connection and apply the engine options.
    ///
    /// Only PostgreSQL has a live driver here.
    pub fn connect(&self) -> Result<Client> {
        match self.dialect {
            Dialect::Postgres => {
                let client = may_postgres::connect(&self.config.url)?;
                for statement in self.options.session_statements() {
                    client.batch_execute(&statement)?;
                }
                Ok(client)
            }
            Dialect::Sqlite => Err(HazelError::Configuration(format!(
                "No live driver available for the {} dialect",
                self.dialect
            ))),
        }
    }
}

/// Creates an [`Engine`] from the `<prefix>url` entry of a settings map.
///
/// # Errors
///
/// Returns `HazelError::Configuration` if the url is missing or names an
/// unknown backing store.
pub fn get_engine(settings: &HashMap<String, String>, prefix: &str) -> Result<Engine> {
    let config = DatabaseConfig::from_settings(settings, prefix)?;
    Engine::from_config(config)
}

/// Produces sessions bound to one engine
#[derive(Debug, Clone)]
pub struct SessionFactory {
    engine: Arc<Engine>,
}

impl SessionFactory {
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Open a session with the engine's configured retry count.
    pub fn open(&self) -> Result<Session> {
        create_session(self, self.engine.config.retry_count)
    }
}

pub fn create_session_factory(engine: Engine) -> SessionFactory {
    SessionFactory {
        engine: Arc::new(engine),
    }
}

/// Opens a new session from the factory.
///
/// `retry_count` is recorded on the session for callers that retry
/// serialization failures; the session itself never retries.
pub fn create_session(factory: &SessionFactory, retry_count: u32) -> Result<Session> {
    let client = factory.engine.connect()?;
    Ok(Session {
        engine: Arc::clone(&factory.engine),
        client,
        retry_count,
    })
}

/// A live connection plus the engine it came from
pub struct Session {
    engine: Arc<Engine>,
    client: Client,
    retry_count: u32,
}

impl Session {
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Introspector over the schema named in the engine config.
    pub fn introspector(&self) -> PostgresIntrospector<'_> {
        PostgresIntrospector::new(&self.client, self.engine.config.schema.clone())
    }

    /// Create every table and index declared in the registry.
    pub fn create_all(&self, registry: &Registry) -> Result<()> {
        for statement in registry.create_all_sql(self.engine.dialect)? {
            log::debug!("Executing DDL: {}", statement);
            self.client.batch_execute(&statement)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("engine", &self.engine)
            .field("retry_count", &self.retry_count)
            .finish_non_exhaustive()
    }
}
