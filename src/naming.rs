//! Constraint naming convention.
//!
//! Different backends autogenerate very different constraint names, which
//! makes migrations painful. Every constraint generated from a [`Registry`]
//! is named through a [`NamingConvention`] instead.
//!
//! [`Registry`]: crate::Registry

use crate::error::{HazelError, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

#[allow(clippy::expect_used)] // Static pattern, validated by tests
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%\((\w+)\)s").expect("valid token pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Index,
    Unique,
    Check,
    ForeignKey,
    PrimaryKey,
}

impl ConstraintKind {
    pub fn prefix(self) -> &'static str {
        match self {
            ConstraintKind::Index => "ix",
            ConstraintKind::Unique => "uq",
            ConstraintKind::Check => "ck",
            ConstraintKind::ForeignKey => "fk",
            ConstraintKind::PrimaryKey => "pk",
        }
    }
}

/// Values substituted into a naming template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintTokens {
    pub table_name: String,
    pub column_0_name: Option<String>,
    pub constraint_name: Option<String>,
    pub referred_table_name: Option<String>,
}

impl ConstraintTokens {
    pub fn table(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Default::default()
        }
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column_0_name = Some(column.into());
        self
    }

    pub fn constraint(mut self, name: impl Into<String>) -> Self {
        self.constraint_name = Some(name.into());
        self
    }

    pub fn referred_table(mut self, table: impl Into<String>) -> Self {
        self.referred_table_name = Some(table.into());
        self
    }

    fn lookup(&self, token: &str) -> Option<String> {
        match token {
            "table_name" => Some(self.table_name.clone()),
            "column_0_name" => self.column_0_name.clone(),
            "column_0_label" => self
                .column_0_name
                .as_ref()
                .map(|column| format!("{}_{}", self.table_name, column)),
            "constraint_name" => self.constraint_name.clone(),
            "referred_table_name" => self.referred_table_name.clone(),
            _ => None,
        }
    }
}

/// Template per constraint kind, using `%(token)s` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConvention {
    templates: HashMap<ConstraintKind, String>,
}

impl Default for NamingConvention {
    /// The convention recommended for Alembic-style migrations.
    fn default() -> Self {
        let templates = HashMap::from([
            (ConstraintKind::Index, "ix_%(column_0_label)s".to_string()),
            (
                ConstraintKind::Unique,
                "uq_%(table_name)s_%(column_0_name)s".to_string(),
            ),
            (
                ConstraintKind::Check,
                "ck_%(table_name)s_%(constraint_name)s".to_string(),
            ),
            (
                ConstraintKind::ForeignKey,
                "fk_%(table_name)s_%(column_0_name)s_%(referred_table_name)s".to_string(),
            ),
            (ConstraintKind::PrimaryKey, "pk_%(table_name)s".to_string()),
        ]);
        Self { templates }
    }
}

impl NamingConvention {
    /// Replace the template for one constraint kind.
    pub fn with_template(mut self, kind: ConstraintKind, template: impl Into<String>) -> Self {
        self.templates.insert(kind, template.into());
        self
    }

    pub fn template(&self, kind: ConstraintKind) -> Option<&str> {
        self.templates.get(&kind).map(String::as_str)
    }

    /// Render the constraint name for `kind`.
    ///
    /// # Errors
    ///
    /// Returns `HazelError::Configuration` if there is no template for `kind`
    /// or a template token has no value in `tokens`.
    pub fn render(&self, kind: ConstraintKind, tokens: &ConstraintTokens) -> Result<String> {
        let template = self.template(kind).ok_or_else(|| {
            HazelError::Configuration(format!(
                "No naming template for {} constraints",
                kind.prefix()
            ))
        })?;

        let mut missing = None;
        let rendered = TOKEN_PATTERN.replace_all(template, |caps: &Captures<'_>| {
            let token = &caps[1];
            tokens.lookup(token).unwrap_or_else(|| {
                missing.get_or_insert_with(|| token.to_string());
                String::new()
            })
        });

        match missing {
            Some(token) => Err(HazelError::Configuration(format!(
                "Naming template {template:?} needs `{token}` for table {}",
                tokens.table_name
            ))),
            None => Ok(rendered.into_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_templates_render() {
        let naming = NamingConvention::default();
        let tokens = ConstraintTokens::table("person")
            .column("email")
            .constraint("adult")
            .referred_table("account");

        let render = |kind| naming.render(kind, &tokens).unwrap();
        assert_eq!(render(ConstraintKind::Index), "ix_person_email");
        assert_eq!(render(ConstraintKind::Unique), "uq_person_email");
        assert_eq!(render(ConstraintKind::Check), "ck_person_adult");
        assert_eq!(render(ConstraintKind::ForeignKey), "fk_person_email_account");
        assert_eq!(render(ConstraintKind::PrimaryKey), "pk_person");
    }

    #[test]
    fn test_missing_token_is_configuration_error() {
        let naming = NamingConvention::default();
        let err = naming
            .render(ConstraintKind::Unique, &ConstraintTokens::table("person"))
            .unwrap_err();
        match err {
            HazelError::Configuration(msg) => assert!(msg.contains("column_0_name"), "{msg}"),
            other => panic!("Expected Configuration, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_template_overrides_default() {
        let naming = NamingConvention::default()
            .with_template(ConstraintKind::PrimaryKey, "%(table_name)s_pkey");
        let name = naming
            .render(ConstraintKind::PrimaryKey, &ConstraintTokens::table("person"))
            .unwrap();
        assert_eq!(name, "person_pkey");
    }
}
