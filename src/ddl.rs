//! DDL generation from registered entities.
//!
//! Each entity becomes one `CREATE TABLE` with its columns, a named primary
//! key and named unique constraints; indexed columns get separate
//! `CREATE INDEX` statements. All constraint names come from the registry's
//! naming convention.

use crate::engine::Dialect;
use crate::error::{HazelError, Result};
use crate::naming::{ConstraintKind, ConstraintTokens};
use crate::registry::Registry;
use sea_query::{
    Index, IndexCreateStatement, PostgresQueryBuilder, SqliteQueryBuilder, Table,
    TableCreateStatement,
};

#[derive(Debug, Clone, Default)]
pub struct SchemaStatements {
    pub tables: Vec<TableCreateStatement>,
    pub indexes: Vec<IndexCreateStatement>,
}

impl SchemaStatements {
    /// Render every statement for `dialect`, tables before indexes.
    pub fn build(&self, dialect: Dialect) -> Vec<String> {
        let tables = self.tables.iter().map(|table| match dialect {
            Dialect::Postgres => table.build(PostgresQueryBuilder),
            Dialect::Sqlite => table.build(SqliteQueryBuilder),
        });
        let indexes = self.indexes.iter().map(|index| match dialect {
            Dialect::Postgres => index.build(PostgresQueryBuilder),
            Dialect::Sqlite => index.build(SqliteQueryBuilder),
        });
        tables.chain(indexes).collect()
    }
}

pub(crate) fn schema_statements(registry: &Registry, dialect: Dialect) -> Result<SchemaStatements> {
    let naming = registry.naming_convention();
    let mut statements = SchemaStatements::default();

    for entity in registry.entities() {
        let table_name = entity.resolve_table_name().ok_or_else(|| {
            HazelError::Configuration(format!("Table definition missing for {}", entity.name()))
        })?;

        let mut table = Table::create();
        table.table(table_name.to_string()).if_not_exists();

        let mut primary_key = Vec::new();
        // Columns owned by other tables are created with those tables
        for column in entity
            .columns()
            .iter()
            .filter(|column| entity.owning_table(column) == Some(table_name))
        {
            let definition = column.definition();
            let mut def = definition.to_column_def(column.key(), dialect);
            table.col(&mut def);

            let tokens = ConstraintTokens::table(table_name).column(column.key());
            if definition.primary_key {
                primary_key.push(column.key().to_string());
            }
            if definition.unique {
                let name = naming.render(ConstraintKind::Unique, &tokens)?;
                table.index(
                    Index::create()
                        .name(name)
                        .col(column.key().to_string())
                        .unique(),
                );
            }
            if definition.indexed {
                let name = naming.render(ConstraintKind::Index, &tokens)?;
                statements.indexes.push(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(table_name.to_string())
                        .col(column.key().to_string())
                        .to_owned(),
                );
            }
        }

        if !primary_key.is_empty() {
            let name = naming.render(ConstraintKind::PrimaryKey, &ConstraintTokens::table(table_name))?;
            let mut pk = Index::create();
            pk.name(name);
            for key in primary_key {
                pk.col(key);
            }
            table.primary_key(&mut pk);
        }

        statements.tables.push(table.to_owned());
    }

    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ColumnDescriptor, EntityDescriptor};

    fn blog_registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .register(
                EntityDescriptor::new("Blog")
                    .table_name("blog")
                    .column(ColumnDescriptor::new("id", "Integer").primary_key())
                    .column(ColumnDescriptor::new("slug", "String").unique())
                    .column(ColumnDescriptor::new("title", "String").indexed())
                    .relationship("Comments"),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_constraints_use_naming_convention() {
        let sql = blog_registry().create_all_sql(Dialect::Postgres).unwrap();
        assert_eq!(sql.len(), 2, "{sql:?}");

        let create_table = &sql[0];
        assert!(create_table.starts_with(r#"CREATE TABLE IF NOT EXISTS "blog""#), "{create_table}");
        assert!(create_table.contains(r#"CONSTRAINT "pk_blog" PRIMARY KEY ("id")"#), "{create_table}");
        assert!(create_table.contains(r#""uq_blog_slug""#), "{create_table}");

        let create_index = &sql[1];
        assert!(create_index.contains(r#""ix_blog_title""#), "{create_index}");
    }

    #[test]
    fn test_columns_of_other_tables_are_left_out() {
        let mut registry = Registry::new();
        registry
            .register(
                EntityDescriptor::new("Manager")
                    .table_name("manager")
                    .column(ColumnDescriptor::new("id", "Integer"))
                    .column(ColumnDescriptor::new("name", "String").in_table("employee")),
            )
            .unwrap();

        let sql = registry.create_all_sql(Dialect::Sqlite).unwrap();
        assert_eq!(sql.len(), 1);
        assert!(!sql[0].contains("name"), "{}", sql[0]);
    }

    #[test]
    fn test_entity_without_table_cannot_be_created() {
        let mut registry = Registry::new();
        registry.register(EntityDescriptor::new("Blank")).unwrap();
        assert!(matches!(
            registry.create_all_sql(Dialect::Postgres),
            Err(HazelError::Configuration(_))
        ));
    }
}
