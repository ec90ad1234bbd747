//! Schema validation: unique tables and routes, safe identifiers, rule/type consistency.

use crate::config::{ColumnType, EntitySchema, SYSTEM_COLUMNS};
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_][a-z0-9_]{0,62}$").expect("identifier regex"));

pub fn validate(schemas: &[&EntitySchema]) -> Result<(), ConfigError> {
    let mut tables = HashSet::new();
    let mut paths = HashSet::new();

    for schema in schemas {
        check_identifier(schema, schema.table)?;
        if !tables.insert(schema.table) {
            return Err(ConfigError::Duplicate {
                kind: "table",
                name: schema.table.to_string(),
            });
        }
        if schema.path_segment.is_empty() || schema.path_segment.contains('/') {
            return Err(ConfigError::InvalidIdentifier {
                entity: schema.name,
                name: schema.path_segment.to_string(),
            });
        }
        if !paths.insert(schema.path_segment) {
            return Err(ConfigError::Duplicate {
                kind: "path segment",
                name: schema.path_segment.to_string(),
            });
        }

        let mut columns = HashSet::new();
        for col in schema.columns {
            check_identifier(schema, col.name)?;
            if let Some(reserved) = SYSTEM_COLUMNS.iter().find(|r| **r == col.name) {
                return Err(ConfigError::ReservedColumn {
                    entity: schema.name,
                    column: *reserved,
                });
            }
            if !columns.insert(col.name) {
                return Err(ConfigError::Duplicate {
                    kind: "column",
                    name: format!("{}.{}", schema.table, col.name),
                });
            }

            let rule = &col.rule;
            let text_only = [
                ("max_length", rule.max_length.is_some()),
                ("min_length", rule.min_length.is_some()),
                ("format", rule.format.is_some()),
                ("allowed", rule.allowed.is_some()),
            ];
            let numeric_only = [
                ("minimum", rule.minimum.is_some()),
                ("maximum", rule.maximum.is_some()),
            ];
            let misplaced = if col.ty.is_numeric() {
                text_only.iter().find(|(_, set)| *set)
            } else {
                numeric_only.iter().find(|(_, set)| *set)
            };
            let mut misplaced = misplaced.map(|(name, _)| *name);
            if rule.scale.is_some() && col.ty != ColumnType::Numeric {
                misplaced = misplaced.or(Some("scale"));
            }
            if let Some(rule_name) = misplaced {
                return Err(ConfigError::RuleMismatch {
                    entity: schema.name,
                    column: col.name,
                    rule: rule_name,
                });
            }
        }
    }

    Ok(())
}

fn check_identifier(schema: &EntitySchema, name: &str) -> Result<(), ConfigError> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier {
            entity: schema.name,
            name: name.to_string(),
        })
    }
}
