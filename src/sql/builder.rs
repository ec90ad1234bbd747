//! Builds parameterized SELECT, INSERT, UPDATE, DELETE and table DDL from an entity schema.

use crate::config::{EntitySchema, CREATED_AT_COLUMN, ID_COLUMN, UPDATED_AT_COLUMN};
use crate::error::ConfigError;
use crate::sql::PgBindValue;

/// Quote identifier for PostgreSQL (safe: only from schema statics).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: PgBindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Column list in select order, shared by SELECT and RETURNING so rows always scan the same way.
fn select_column_list(schema: &EntitySchema) -> String {
    schema
        .select_columns()
        .into_iter()
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

fn check_arity(schema: &EntitySchema, values: &[PgBindValue]) -> Result<(), ConfigError> {
    if values.len() == schema.columns.len() {
        Ok(())
    } else {
        Err(ConfigError::ColumnMismatch {
            entity: schema.name,
            expected: schema.columns.len(),
            got: values.len(),
        })
    }
}

/// SELECT all rows ordered by id.
pub fn select_list(schema: &EntitySchema) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(schema),
        quoted(schema.table),
        quoted(ID_COLUMN)
    );
    q
}

/// SELECT one row by primary key.
pub fn select_by_id(schema: &EntitySchema, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id.into());
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        select_column_list(schema),
        quoted(schema.table),
        quoted(ID_COLUMN),
        n
    );
    q
}

/// INSERT every writable column; id and timestamps come from column defaults.
/// `values` must line up with `schema.columns`.
pub fn insert(schema: &EntitySchema, values: Vec<PgBindValue>) -> Result<QueryBuf, ConfigError> {
    check_arity(schema, &values)?;
    let mut q = QueryBuf::new();
    let table = quoted(schema.table);
    let returning = select_column_list(schema);
    if values.is_empty() {
        q.sql = format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", table, returning);
        return Ok(q);
    }
    let mut cols = Vec::with_capacity(values.len());
    let mut placeholders = Vec::with_capacity(values.len());
    for (col, val) in schema.columns.iter().zip(values) {
        let n = q.push_param(val);
        cols.push(quoted(col.name));
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table,
        cols.join(", "),
        placeholders.join(", "),
        returning
    );
    Ok(q)
}

/// UPDATE by id, replacing every writable column. `updated_at` always moves forward,
/// even when two updates land within the same clock tick.
pub fn update(schema: &EntitySchema, id: i64, values: Vec<PgBindValue>) -> Result<QueryBuf, ConfigError> {
    check_arity(schema, &values)?;
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(values.len() + 1);
    for (col, val) in schema.columns.iter().zip(values) {
        let n = q.push_param(val);
        sets.push(format!("{} = ${}", quoted(col.name), n));
    }
    let updated_at = quoted(UPDATED_AT_COLUMN);
    sets.push(format!(
        "{0} = GREATEST(clock_timestamp(), {0} + INTERVAL '1 microsecond')",
        updated_at
    ));
    let id_param = q.push_param(id.into());
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        quoted(schema.table),
        sets.join(", "),
        quoted(ID_COLUMN),
        id_param
    );
    Ok(q)
}

/// DELETE by id.
pub fn delete(schema: &EntitySchema, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id.into());
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${}",
        quoted(schema.table),
        quoted(ID_COLUMN),
        n
    );
    q
}

/// CREATE TABLE IF NOT EXISTS with a BIGSERIAL key and store-managed timestamps.
pub fn create_table(schema: &EntitySchema) -> String {
    let mut col_defs = Vec::with_capacity(schema.columns.len() + 3);
    col_defs.push(format!("{} BIGSERIAL PRIMARY KEY", quoted(ID_COLUMN)));
    for c in schema.columns {
        let mut def = format!("{} {}", quoted(c.name), c.ty.pg_type());
        if !c.nullable {
            def.push_str(" NOT NULL");
        }
        col_defs.push(def);
    }
    for name in [CREATED_AT_COLUMN, UPDATED_AT_COLUMN] {
        col_defs.push(format!("{} TIMESTAMPTZ NOT NULL DEFAULT NOW()", quoted(name)));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quoted(schema.table),
        col_defs.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, Product};
    use rust_decimal::Decimal;

    fn product() -> Product {
        Product {
            manufacturer_id: 3,
            name: "Pod'; DROP TABLE products; --".into(),
            description: None,
            price: Decimal::new(1999, 2),
        }
    }

    #[test]
    fn select_queries_use_declared_column_order() {
        let q = select_list(Product::schema());
        assert_eq!(
            q.sql,
            "SELECT \"id\", \"manufacturer_id\", \"name\", \"description\", \"price\", \"created_at\", \"updated_at\" \
             FROM \"products\" ORDER BY \"id\""
        );
        assert!(q.params.is_empty());

        let q = select_by_id(Product::schema(), 42);
        assert!(q.sql.ends_with("FROM \"products\" WHERE \"id\" = $1"));
        assert_eq!(q.params, vec![PgBindValue::BigInt(Some(42))]);
    }

    #[test]
    fn insert_binds_values_instead_of_interpolating() {
        let p = product();
        let q = insert(Product::schema(), p.values()).unwrap();
        assert!(q.sql.starts_with(
            "INSERT INTO \"products\" (\"manufacturer_id\", \"name\", \"description\", \"price\") \
             VALUES ($1, $2, $3, $4) RETURNING \"id\""
        ));
        assert!(!q.sql.contains("DROP"));
        assert_eq!(q.params.len(), 4);
        assert_eq!(q.params[1], PgBindValue::Text(Some(p.name.clone())));
        assert_eq!(q.params[2], PgBindValue::Text(None));
    }

    #[test]
    fn update_replaces_all_columns_and_bumps_updated_at() {
        let q = update(Product::schema(), 9, product().values()).unwrap();
        assert_eq!(
            q.sql,
            "UPDATE \"products\" SET \"manufacturer_id\" = $1, \"name\" = $2, \"description\" = $3, \"price\" = $4, \
             \"updated_at\" = GREATEST(clock_timestamp(), \"updated_at\" + INTERVAL '1 microsecond') \
             WHERE \"id\" = $5"
        );
        assert_eq!(q.params.last(), Some(&PgBindValue::BigInt(Some(9))));
        assert!(!q.sql.contains("created_at"));
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        let err = insert(Product::schema(), vec![PgBindValue::from("only one")]).unwrap_err();
        assert!(matches!(err, ConfigError::ColumnMismatch { expected: 4, got: 1, .. }));
        assert!(update(Product::schema(), 1, Vec::new()).is_err());
    }

    #[test]
    fn delete_and_ddl() {
        let q = delete(Product::schema(), 5);
        assert_eq!(q.sql, "DELETE FROM \"products\" WHERE \"id\" = $1");
        assert_eq!(q.params, vec![PgBindValue::BigInt(Some(5))]);

        let ddl = create_table(Product::schema());
        assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS \"products\" (\"id\" BIGSERIAL PRIMARY KEY"));
        assert!(ddl.contains("\"price\" NUMERIC(12, 2) NOT NULL"));
        assert!(ddl.contains("\"description\" TEXT,"));
        assert!(ddl.ends_with("\"updated_at\" TIMESTAMPTZ NOT NULL DEFAULT NOW())"));
    }
}
