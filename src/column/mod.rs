//! Column metadata and type mapping for generated DDL.

pub mod definition;
pub(crate) mod type_mapping;

pub use definition::ColumnDefinition;
