//! Declarative entity registry.
//!
//! A [`Registry`] maps entity names to [`EntityDescriptor`]s and carries the
//! [`NamingConvention`] used for the DDL it generates. Every registry gets a
//! process-unique [`RegistryId`] so attachment code can tell "same registry"
//! from "different registry" without comparing contents.
//!
//! Registration takes `&mut self`; sharing a registry across threads needs
//! external synchronization. Do all registration during startup, before the
//! registry is read concurrently.

use crate::ddl::{self, SchemaStatements};
use crate::engine::Dialect;
use crate::entity::EntityDescriptor;
use crate::error::{HazelError, Result};
use crate::naming::NamingConvention;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`Registry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistryId(u64);

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "registry#{}", self.0)
    }
}

#[derive(Debug)]
pub struct Registry {
    id: RegistryId,
    entities: BTreeMap<String, EntityDescriptor>,
    naming: NamingConvention,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::with_naming_convention(NamingConvention::default())
    }

    pub fn with_naming_convention(naming: NamingConvention) -> Self {
        Self {
            id: RegistryId(NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed)),
            entities: BTreeMap::new(),
            naming,
        }
    }

    pub fn id(&self) -> RegistryId {
        self.id
    }

    pub fn naming_convention(&self) -> &NamingConvention {
        &self.naming
    }

    /// Register an entity.
    ///
    /// # Errors
    ///
    /// Returns `HazelError::Configuration` if the entity name or its table is
    /// already registered, or if two of its columns share a key.
    pub fn register(&mut self, descriptor: EntityDescriptor) -> Result<()> {
        if self.entities.contains_key(descriptor.name()) {
            return Err(HazelError::Configuration(format!(
                "Entity {} is already registered in {}",
                descriptor.name(),
                self.id
            )));
        }

        if let Some(table) = descriptor.resolve_table_name() {
            if let Some(owner) = self.table_owner(table) {
                return Err(HazelError::Configuration(format!(
                    "Table {table} of entity {} is already mapped by entity {owner}",
                    descriptor.name()
                )));
            }
        }

        let mut keys = HashSet::new();
        for column in descriptor.columns() {
            if !keys.insert(column.key()) {
                return Err(HazelError::Configuration(format!(
                    "Entity {} declares column {} more than once",
                    descriptor.name(),
                    column.key()
                )));
            }
        }

        log::debug!("Registered entity {} in {}", descriptor.name(), self.id);
        self.entities.insert(descriptor.name().to_string(), descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&EntityDescriptor> {
        self.entities.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// Registered entities, ordered by name.
    pub fn entities(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Name of the entity mapped to `table`, if any.
    pub fn table_owner(&self, table: &str) -> Option<&str> {
        self.entities()
            .find(|entity| entity.resolve_table_name() == Some(table))
            .map(EntityDescriptor::name)
    }

    /// `CREATE TABLE` / `CREATE INDEX` statements for every registered entity.
    pub fn create_table_statements(&self, dialect: Dialect) -> Result<SchemaStatements> {
        ddl::schema_statements(self, dialect)
    }

    /// Rendered DDL for every registered entity, tables first.
    pub fn create_all_sql(&self, dialect: Dialect) -> Result<Vec<String>> {
        Ok(self.create_table_statements(dialect)?.build(dialect))
    }
}
