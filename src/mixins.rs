//! Reusable column sets.

use crate::entity::{ColumnDescriptor, EntityDescriptor};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// UUID-backed primary key column named `id`
pub struct UuidPrimaryKey;

impl UuidPrimaryKey {
    pub const KEY: &'static str = "id";

    pub fn column() -> ColumnDescriptor {
        ColumnDescriptor::new(Self::KEY, "Uuid").primary_key()
    }

    /// Fresh primary key value, as the hyphenated string stored in `id`.
    pub fn generate() -> String {
        Uuid::new_v4().to_string()
    }
}

/// `created_at` (required) and `updated_at` (set on modification) columns
pub struct Timestamps;

impl Timestamps {
    pub const CREATED_AT: &'static str = "created_at";
    pub const UPDATED_AT: &'static str = "updated_at";

    pub fn columns() -> [ColumnDescriptor; 2] {
        [
            ColumnDescriptor::new(Self::CREATED_AT, "Timestamp").default_expr("CURRENT_TIMESTAMP"),
            ColumnDescriptor::new(Self::UPDATED_AT, "Timestamp").nullable(),
        ]
    }

    /// Value to write into `created_at` / `updated_at`.
    pub fn now() -> DateTime<Utc> {
        Utc::now()
    }
}

/// Base layout for domain entities: UUID primary key plus timestamps
pub struct DomainModel;

impl DomainModel {
    pub fn entity(name: impl Into<String>, table_name: impl Into<String>) -> EntityDescriptor {
        EntityDescriptor::new(name)
            .table_name(table_name)
            .with_uuid_primary_key()
            .with_timestamps()
    }
}
