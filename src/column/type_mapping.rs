//! Type mapping utilities for converting column type strings to `SeaQuery` `ColumnDef`.

use crate::engine::Dialect;
use crate::types::CHOICE_COLUMN_TYPE;
use sea_query::ColumnDef;

/// Map a column type string to a `SeaQuery` `ColumnDef` type
///
/// Type names are matched case-insensitively:
/// - "Integer" / "i32" → `.integer()`, "BigInt" / "i64" → `.big_integer()`
/// - "String" / "Text" → `.text()`
/// - "Boolean" / "bool" → `.boolean()`
/// - "Float" / "Double" → `.float()` / `.double()`
/// - `"Timestamp"` / `"DateTime"` → `.timestamp()`
/// - "Uuid" → the dialect's UUID storage
/// - "Choice" → `.integer()`
///
/// Unknown types fall back to text.
pub(crate) fn apply_column_type(col_type: &str, def: &mut ColumnDef, dialect: Dialect) {
    let col_type_lower = col_type.to_lowercase();
    match col_type_lower.as_str() {
        "integer" | "i32" | "int" | CHOICE_COLUMN_TYPE => {
            def.integer();
        }
        "bigint" | "i64" | "big_integer" => {
            def.big_integer();
        }
        "smallint" | "i16" => {
            def.small_integer();
        }
        "string" | "text" | "varchar" => {
            def.text();
        }
        "boolean" | "bool" => {
            def.boolean();
        }
        "float" | "f32" | "real" => {
            def.float();
        }
        "double" | "f64" | "double_precision" => {
            def.double();
        }
        "json" | "jsonb" => {
            def.json();
        }
        "timestamp" | "datetime" | "timestamptz" => {
            def.timestamp();
        }
        "date" => {
            def.date();
        }
        "time" | "timetz" => {
            def.time();
        }
        "uuid" => {
            dialect.uuid_storage().apply_column_type(def);
        }
        "binary" | "bytes" | "bytea" | "blob" => {
            def.binary();
        }
        _ => {
            def.text();
        }
    }
}
