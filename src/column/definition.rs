//! Column definition metadata.
//!
//! `ColumnDefinition` stores what DDL generation needs to know about a
//! column: type, nullability, key and index flags, default expression. The
//! sanity checker ignores all of it and only looks at column presence.

use super::type_mapping;
use crate::engine::Dialect;
use sea_query::{ColumnDef, Expr};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnDefinition {
    /// Column type (e.g., "Integer", "String", "Uuid")
    pub column_type: Option<String>,
    pub nullable: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub indexed: bool,
    pub auto_increment: bool,
    /// Default SQL expression (e.g., "CURRENT_TIMESTAMP")
    pub default_expr: Option<String>,
}

impl ColumnDefinition {
    pub fn of_type(column_type: impl Into<String>) -> Self {
        Self {
            column_type: Some(column_type.into()),
            ..Default::default()
        }
    }

    /// Convert to SeaQuery's `ColumnDef`
    ///
    /// The primary key is not set here; tables declare it as a named
    /// constraint so the naming convention applies.
    pub fn to_column_def(&self, column_name: &str, dialect: Dialect) -> ColumnDef {
        let mut def = ColumnDef::new(column_name.to_string());

        if let Some(ref col_type) = self.column_type {
            type_mapping::apply_column_type(col_type, &mut def, dialect);
        } else {
            def.text();
        }

        if self.nullable {
            def.null();
        } else {
            def.not_null();
        }

        if self.auto_increment {
            def.auto_increment();
        }

        self.apply_default_expr(&mut def);

        def
    }

    pub fn apply_default_expr(&self, def: &mut ColumnDef) {
        if let Some(ref expr_str) = self.default_expr {
            def.default(Expr::cust(expr_str.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_query::{PostgresQueryBuilder, SqliteQueryBuilder, Table};

    fn render(def: &ColumnDefinition, dialect: Dialect) -> String {
        let mut column = def.to_column_def("value", dialect);
        let table = Table::create().table("t").col(&mut column).to_owned();
        match dialect {
            Dialect::Postgres => table.build(PostgresQueryBuilder),
            Dialect::Sqlite => table.build(SqliteQueryBuilder),
        }
    }

    #[test]
    fn test_column_definition_default() {
        let def = ColumnDefinition::default();
        assert_eq!(def.column_type, None);
        assert!(!def.nullable);
        assert!(!def.primary_key);
        assert!(!def.unique);
        assert!(!def.indexed);
        assert_eq!(def.default_expr, None);
    }

    #[test]
    fn test_uuid_type_follows_dialect() {
        let def = ColumnDefinition::of_type("Uuid");
        assert!(render(&def, Dialect::Postgres).contains("uuid"));
        assert!(render(&def, Dialect::Sqlite).contains("char(32)"));
    }

    #[test]
    fn test_nullability_and_default_are_rendered() {
        let def = ColumnDefinition {
            column_type: Some("Timestamp".to_string()),
            nullable: false,
            default_expr: Some("CURRENT_TIMESTAMP".to_string()),
            ..Default::default()
        };
        let sql = render(&def, Dialect::Postgres);
        assert!(sql.contains("NOT NULL"), "{sql}");
        assert!(sql.contains("DEFAULT CURRENT_TIMESTAMP"), "{sql}");
    }
}
