//! # hazel-db
//!
//! Helpers for wiring a PostgreSQL application's data layer together:
//!
//! - [`get_engine`], [`create_session_factory`] and [`create_session`] build
//!   connections from a settings map or [`DatabaseConfig`]
//! - [`Registry`] holds entity descriptors and names generated constraints
//!   through a [`NamingConvention`]
//! - [`attach_entity`] / [`attach_all`] late-bind [`LooseEntity`] definitions
//! - [`is_schema_intact`] / [`check_schema`] compare a registry with the live
//!   schema
//! - [`types`] has the portable UUID and choice column converters, [`mixins`]
//!   the UUID primary key and timestamp columns
//!
//! ```
//! use hazel_db::{check_schema, ColumnDescriptor, EntityDescriptor, Registry, StaticSchema};
//!
//! let mut registry = Registry::new();
//! registry.register(
//!     EntityDescriptor::new("Person")
//!         .table_name("person")
//!         .column(ColumnDescriptor::new("id", "Integer").primary_key())
//!         .column(ColumnDescriptor::new("name", "String")),
//! )?;
//!
//! let live = StaticSchema::new().table("person", ["id"]);
//! let report = check_schema(&registry, &live)?;
//! assert!(!report.is_intact());
//! assert_eq!(report.mismatches.len(), 1);
//! # Ok::<(), hazel_db::HazelError>(())
//! ```

pub mod attach;
pub mod column;
pub mod config;
pub mod ddl;
pub mod engine;
pub mod entity;
pub mod error;
pub mod introspect;
pub mod mixins;
pub mod naming;
pub mod registry;
pub mod sanity;
pub mod types;

pub use attach::{attach_all, attach_entity};
pub use column::ColumnDefinition;
pub use config::DatabaseConfig;
pub use engine::{
    create_session, create_session_factory, get_engine, Dialect, Engine, EngineOptions, Session,
    SessionFactory,
};
pub use entity::{ColumnDescriptor, EntityDescriptor, LooseEntity};
pub use error::{HazelError, Result};
pub use introspect::{PostgresIntrospector, SchemaIntrospector, StaticSchema};
pub use mixins::{DomainModel, Timestamps, UuidPrimaryKey};
pub use naming::{ConstraintKind, ConstraintTokens, NamingConvention};
pub use registry::{Registry, RegistryId};
pub use sanity::{check_schema, is_schema_intact, SanityReport, SchemaMismatch};
