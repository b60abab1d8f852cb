//! Backend-agnostic UUID column type.
//!
//! PostgreSQL stores UUIDs in its native `uuid` type; other backends get a
//! `CHAR(32)` column holding the lowercase hex digits. The strategy is chosen
//! once per dialect (see [`crate::Dialect::uuid_storage`]).

use crate::engine::Dialect;
use crate::error::{HazelError, Result};
use sea_query::ColumnDef;
use std::fmt;
use uuid::Uuid;

/// How a UUID is laid out in one backing-store family
pub trait UuidStorage: fmt::Debug + Send + Sync {
    /// Set the column type used to store UUIDs.
    fn apply_column_type(&self, def: &mut ColumnDef);

    /// Storage representation of a UUID.
    fn encode(&self, value: &Uuid) -> String;

    /// Parse a stored value. Both hyphenated and bare hex forms are accepted.
    fn decode(&self, raw: &str) -> Result<Uuid> {
        parse_uuid(raw)
    }
}

/// Native `uuid` column, canonical hyphenated text on the wire
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeUuid;

impl UuidStorage for NativeUuid {
    fn apply_column_type(&self, def: &mut ColumnDef) {
        def.uuid();
    }

    fn encode(&self, value: &Uuid) -> String {
        value.hyphenated().to_string()
    }
}

/// `CHAR(32)` column of lowercase hex digits
#[derive(Debug, Clone, Copy, Default)]
pub struct HexCharUuid;

impl UuidStorage for HexCharUuid {
    fn apply_column_type(&self, def: &mut ColumnDef) {
        def.char_len(32);
    }

    fn encode(&self, value: &Uuid) -> String {
        value.simple().to_string()
    }
}

/// Value accepted on the encode side: a UUID or its textual form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UuidValue {
    Uuid(Uuid),
    Text(String),
}

impl UuidValue {
    pub fn to_uuid(&self) -> Result<Uuid> {
        match self {
            UuidValue::Uuid(value) => Ok(*value),
            UuidValue::Text(raw) => parse_uuid(raw),
        }
    }
}

impl From<Uuid> for UuidValue {
    fn from(value: Uuid) -> Self {
        UuidValue::Uuid(value)
    }
}

impl From<String> for UuidValue {
    fn from(value: String) -> Self {
        UuidValue::Text(value)
    }
}

impl From<&str> for UuidValue {
    fn from(value: &str) -> Self {
        UuidValue::Text(value.to_string())
    }
}

fn parse_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| HazelError::Conversion(format!("Invalid UUID {raw:?}: {e}")))
}

/// UUID column converter bound to one storage strategy
#[derive(Debug, Clone, Copy)]
pub struct PortableUuid {
    storage: &'static dyn UuidStorage,
}

impl PortableUuid {
    pub fn new(storage: &'static dyn UuidStorage) -> Self {
        Self { storage }
    }

    pub fn for_dialect(dialect: Dialect) -> Self {
        Self::new(dialect.uuid_storage())
    }

    pub fn storage(&self) -> &'static dyn UuidStorage {
        self.storage
    }

    /// Domain value to storage value. Strings are validated as UUIDs first.
    pub fn encode<V: Into<UuidValue>>(&self, value: Option<V>) -> Result<Option<String>> {
        value
            .map(|v| v.into().to_uuid().map(|uuid| self.storage.encode(&uuid)))
            .transpose()
    }

    /// Storage value to domain value.
    pub fn decode(&self, value: Option<&str>) -> Result<Option<Uuid>> {
        value.map(|raw| self.storage.decode(raw)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_on_both_dialects() {
        for dialect in [Dialect::Postgres, Dialect::Sqlite] {
            let column = PortableUuid::for_dialect(dialect);
            let id = Uuid::new_v4();

            let stored = column.encode(Some(id)).unwrap();
            let decoded = column.decode(stored.as_deref()).unwrap();
            assert_eq!(decoded, Some(id), "round trip failed for {dialect}");
        }
    }

    #[test]
    fn test_hex_storage_is_zero_padded() {
        let column = PortableUuid::for_dialect(Dialect::Sqlite);
        let id = Uuid::parse_str("00000000-0000-4000-8000-00000000002a").unwrap();

        let stored = column.encode(Some(id)).unwrap().unwrap();
        assert_eq!(stored, "0000000000004000800000000000002a");
        assert_eq!(stored.len(), 32);
    }

    #[test]
    fn test_native_storage_is_hyphenated() {
        let column = PortableUuid::for_dialect(Dialect::Postgres);
        let raw = "67e55044-10b1-426f-9247-bb680e5fe0c8";

        let stored = column.encode(Some(raw)).unwrap();
        assert_eq!(stored.as_deref(), Some(raw));
    }

    #[test]
    fn test_string_input_is_accepted_and_normalised() {
        let column = PortableUuid::for_dialect(Dialect::Sqlite);
        let stored = column
            .encode(Some("67E55044-10B1-426F-9247-BB680E5FE0C8".to_string()))
            .unwrap();
        assert_eq!(stored.as_deref(), Some("67e5504410b1426f9247bb680e5fe0c8"));
    }

    #[test]
    fn test_none_passes_through() {
        let column = PortableUuid::for_dialect(Dialect::Postgres);
        assert_eq!(column.encode(None::<Uuid>).unwrap(), None);
        assert_eq!(column.decode(None).unwrap(), None);
    }

    #[test]
    fn test_invalid_text_is_conversion_error() {
        let column = PortableUuid::for_dialect(Dialect::Sqlite);
        assert!(matches!(
            column.encode(Some("not-a-uuid")),
            Err(HazelError::Conversion(_))
        ));
        assert!(matches!(
            column.decode(Some("zz")),
            Err(HazelError::Conversion(_))
        ));
    }
}
