//! Schema sanity checking.
//!
//! Compares the entities in a [`Registry`] against a live schema. Only
//! presence is checked: every entity's table must exist and every declared
//! column must exist in its owning table. Column types, nullability and
//! relationships are not verified.
//!
//! Drift is accumulated, not raised: a check always walks every entity and
//! reports every mismatch it finds. Configuration mistakes (an entity with no
//! table) and introspection failures other than a missing table abort the
//! check with an error.

use crate::entity::EntityDescriptor;
use crate::error::{HazelError, Result};
use crate::introspect::SchemaIntrospector;
use crate::registry::Registry;
use std::fmt;

/// One difference between the registry and the live schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaMismatch {
    MissingTable { entity: String, table: String },
    MissingColumn {
        entity: String,
        table: String,
        column: String,
    },
}

impl SchemaMismatch {
    pub fn entity(&self) -> &str {
        match self {
            SchemaMismatch::MissingTable { entity, .. }
            | SchemaMismatch::MissingColumn { entity, .. } => entity,
        }
    }

    pub fn table(&self) -> &str {
        match self {
            SchemaMismatch::MissingTable { table, .. }
            | SchemaMismatch::MissingColumn { table, .. } => table,
        }
    }
}

impl fmt::Display for SchemaMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaMismatch::MissingTable { entity, table } => write!(
                f,
                "Model {entity} declares table {table} which does not exist in the database"
            ),
            SchemaMismatch::MissingColumn {
                entity,
                table,
                column,
            } => write!(
                f,
                "Model {entity} declares column {column} which does not exist in table {table}"
            ),
        }
    }
}

/// Outcome of one sanity check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanityReport {
    pub mismatches: Vec<SchemaMismatch>,
}

impl SanityReport {
    pub fn is_intact(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// `true` if every registered entity has its table and all declared columns.
///
/// Each mismatch is logged at error level; use [`check_schema`] to get them
/// back as values.
pub fn is_schema_intact(registry: &Registry, introspector: &dyn SchemaIntrospector) -> Result<bool> {
    Ok(check_schema(registry, introspector)?.is_intact())
}

/// Check every registered entity and return all mismatches found.
///
/// # Errors
///
/// Returns `HazelError::Configuration` if an entity resolves to no table, and
/// passes through introspection errors other than `TableNotFound`.
pub fn check_schema(
    registry: &Registry,
    introspector: &dyn SchemaIntrospector,
) -> Result<SanityReport> {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("schema_sanity_check", entities = registry.len()).entered();

    let tables = introspector.list_tables()?;
    let mut report = SanityReport::default();

    for entity in registry.entities() {
        let table_name = entity.resolve_table_name().ok_or_else(|| {
            HazelError::Configuration(format!("Table definition missing for {}", entity.name()))
        })?;

        if !tables.contains(table_name) {
            record(
                &mut report,
                SchemaMismatch::MissingTable {
                    entity: entity.name().to_string(),
                    table: table_name.to_string(),
                },
            );
            continue;
        }

        check_columns(entity, table_name, introspector, &mut report)?;
    }

    if report.is_intact() {
        log::debug!("Schema matches all {} registered entities", registry.len());
    }
    Ok(report)
}

fn check_columns(
    entity: &EntityDescriptor,
    table_name: &str,
    introspector: &dyn SchemaIntrospector,
    report: &mut SanityReport,
) -> Result<()> {
    for column in entity.columns() {
        let owning_table = entity.owning_table(column).unwrap_or(table_name);

        let present = match introspector.list_columns(owning_table) {
            Ok(columns) => columns,
            Err(HazelError::TableNotFound(_)) => {
                record(
                    report,
                    SchemaMismatch::MissingTable {
                        entity: entity.name().to_string(),
                        table: owning_table.to_string(),
                    },
                );
                break;
            }
            Err(e) => return Err(e),
        };

        if !present.contains(column.key()) {
            record(
                report,
                SchemaMismatch::MissingColumn {
                    entity: entity.name().to_string(),
                    table: owning_table.to_string(),
                    column: column.key().to_string(),
                },
            );
        }
    }
    Ok(())
}

fn record(report: &mut SanityReport, mismatch: SchemaMismatch) {
    log::error!("{}", mismatch);
    report.mismatches.push(mismatch);
}
