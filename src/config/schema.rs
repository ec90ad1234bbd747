//! Entity schema: table, route and column layout plus per-column validation rules.
//!
//! Schemas are declared as statics next to each model and are the single source for
//! SQL generation, row binding order and request validation.

/// Store-assigned primary key, present on every table.
pub const ID_COLUMN: &str = "id";
pub const CREATED_AT_COLUMN: &str = "created_at";
pub const UPDATED_AT_COLUMN: &str = "updated_at";

/// Columns managed by the store rather than by request bodies.
pub const SYSTEM_COLUMNS: [&str; 3] = [ID_COLUMN, CREATED_AT_COLUMN, UPDATED_AT_COLUMN];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    BigInt,
    /// NUMERIC(12, 2), bound as `rust_decimal::Decimal`.
    Numeric,
}

impl ColumnType {
    /// PostgreSQL type used in DDL.
    pub fn pg_type(&self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "INTEGER",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Numeric => "NUMERIC(12, 2)",
        }
    }

    /// Integer and decimal columns; they take range and scale rules instead of text rules.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, ColumnType::Text)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Email,
    Url,
}

/// Declarative constraints for one column. Required-ness comes from the column's nullability.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValidationRule {
    pub max_length: Option<u32>,
    pub min_length: Option<u32>,
    pub format: Option<Format>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    /// Most fractional digits a decimal may carry; the store would round anything finer.
    pub scale: Option<u32>,
    pub allowed: Option<&'static [&'static str]>,
}

impl ValidationRule {
    pub const fn new() -> Self {
        ValidationRule {
            max_length: None,
            min_length: None,
            format: None,
            minimum: None,
            maximum: None,
            scale: None,
            allowed: None,
        }
    }

    pub const fn max_length(self, n: u32) -> Self {
        ValidationRule { max_length: Some(n), ..self }
    }

    pub const fn min_length(self, n: u32) -> Self {
        ValidationRule { min_length: Some(n), ..self }
    }

    pub const fn format(self, format: Format) -> Self {
        ValidationRule { format: Some(format), ..self }
    }

    pub const fn minimum(self, n: f64) -> Self {
        ValidationRule { minimum: Some(n), ..self }
    }

    pub const fn maximum(self, n: f64) -> Self {
        ValidationRule { maximum: Some(n), ..self }
    }

    pub const fn scale(self, digits: u32) -> Self {
        ValidationRule { scale: Some(digits), ..self }
    }

    pub const fn allowed(self, values: &'static [&'static str]) -> Self {
        ValidationRule { allowed: Some(values), ..self }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    /// snake_case column name; the wire name is its camelCase form.
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
    pub rule: ValidationRule,
}

impl ColumnDef {
    /// NOT NULL column; requests must supply a non-blank value.
    pub const fn required(name: &'static str, ty: ColumnType) -> Self {
        ColumnDef {
            name,
            ty,
            nullable: false,
            rule: ValidationRule::new(),
        }
    }

    pub const fn optional(name: &'static str, ty: ColumnType) -> Self {
        ColumnDef {
            name,
            ty,
            nullable: true,
            rule: ValidationRule::new(),
        }
    }

    pub const fn with(self, rule: ValidationRule) -> Self {
        ColumnDef { rule, ..self }
    }

    pub fn is_required(&self) -> bool {
        !self.nullable
    }
}

/// Everything the generic repository and handlers need to know about one entity.
#[derive(Debug)]
pub struct EntitySchema {
    /// Singular name used in messages, e.g. "category".
    pub name: &'static str,
    pub table: &'static str,
    /// Route segment, e.g. "categories" for `/categories/:id`.
    pub path_segment: &'static str,
    /// Writable columns in bind order. System columns are implied.
    pub columns: &'static [ColumnDef],
}

impl EntitySchema {
    /// Column names in select order: id, writable columns, timestamps.
    pub fn select_columns(&self) -> Vec<&'static str> {
        let mut cols = Vec::with_capacity(self.columns.len() + SYSTEM_COLUMNS.len());
        cols.push(ID_COLUMN);
        cols.extend(self.columns.iter().map(|c| c.name));
        cols.push(CREATED_AT_COLUMN);
        cols.push(UPDATED_AT_COLUMN);
        cols
    }
}
