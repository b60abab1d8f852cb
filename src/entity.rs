//! Entity and column descriptors.
//!
//! An [`EntityDescriptor`] is the logical definition of a persistent record
//! type. Descriptors are plain values: they join a [`Registry`] through an
//! explicit [`Registry::register`] call or late via
//! [`attach_entity`](crate::attach::attach_entity) on a [`LooseEntity`].
//!
//! [`Registry`]: crate::Registry
//! [`Registry::register`]: crate::Registry::register

use crate::column::ColumnDefinition;
use crate::mixins::{Timestamps, UuidPrimaryKey};
use crate::registry::{Registry, RegistryId};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    key: String,
    table: Option<String>,
    definition: ColumnDefinition,
}

impl ColumnDescriptor {
    pub fn new(key: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            table: None,
            definition: ColumnDefinition::of_type(column_type),
        }
    }

    pub fn with_definition(key: impl Into<String>, definition: ColumnDefinition) -> Self {
        Self {
            key: key.into(),
            table: None,
            definition,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.definition.nullable = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.definition.primary_key = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.definition.unique = true;
        self
    }

    pub fn indexed(mut self) -> Self {
        self.definition.indexed = true;
        self
    }

    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.definition.default_expr = Some(expr.into());
        self
    }

    /// Column lives in another table than its entity's (joined layouts).
    pub fn in_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Explicit owning table, if the column does not live in its entity's table.
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn definition(&self) -> &ColumnDefinition {
        &self.definition
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    name: String,
    table: Option<String>,
    table_name: Option<String>,
    columns: Vec<ColumnDescriptor>,
    relationships: BTreeSet<String>,
}

impl EntityDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            table_name: None,
            columns: Vec::new(),
            relationships: BTreeSet::new(),
        }
    }

    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    /// Bind an explicit table. Takes precedence over [`table_name`](Self::table_name).
    pub fn bind_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    pub fn relationship(mut self, entity: impl Into<String>) -> Self {
        self.relationships.insert(entity.into());
        self
    }

    /// Prepend a UUID `id` primary key.
    pub fn with_uuid_primary_key(mut self) -> Self {
        self.columns.insert(0, UuidPrimaryKey::column());
        self
    }

    /// Append `created_at` / `updated_at`.
    pub fn with_timestamps(mut self) -> Self {
        self.columns.extend(Timestamps::columns());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn relationships(&self) -> &BTreeSet<String> {
        &self.relationships
    }

    /// Table this entity maps to: the explicit binding first, then `table_name`.
    pub fn resolve_table_name(&self) -> Option<&str> {
        self.table
            .as_deref()
            .or(self.table_name.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// Table that owns `column`.
    pub fn owning_table<'a>(&'a self, column: &'a ColumnDescriptor) -> Option<&'a str> {
        column.table().or_else(|| self.resolve_table_name())
    }
}

/// An entity definition that is not yet part of any registry
///
/// Clones share one attachment marker: attaching any clone attaches them all.
#[derive(Debug, Clone)]
pub struct LooseEntity {
    descriptor: EntityDescriptor,
    base: Option<RegistryId>,
    attached_to: Arc<Mutex<Option<RegistryId>>>,
}

impl LooseEntity {
    pub fn new(descriptor: EntityDescriptor) -> Self {
        Self {
            descriptor,
            base: None,
            attached_to: Arc::new(Mutex::new(None)),
        }
    }

    /// Mark the entity as declared directly on `registry`'s base type.
    ///
    /// Such entities are already integrated and `attach_all` skips them.
    pub fn declared_on(mut self, registry: &Registry) -> Self {
        self.base = Some(registry.id());
        self
    }

    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }

    pub fn base(&self) -> Option<RegistryId> {
        self.base
    }

    pub fn attached_to(&self) -> Option<RegistryId> {
        *self.attachment()
    }

    /// Lock the shared attachment marker. Held across registration so two
    /// clones cannot both claim an unattached entity.
    pub(crate) fn attachment(&self) -> MutexGuard<'_, Option<RegistryId>> {
        self.attached_to
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
