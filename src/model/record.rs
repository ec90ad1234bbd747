use crate::config::{CREATED_AT_COLUMN, ID_COLUMN, UPDATED_AT_COLUMN};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

/// A persisted entity: store-assigned id, the entity's fields and lifecycle timestamps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<E> {
    pub id: i64,
    #[serde(flatten)]
    pub fields: E,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<E> Record<E> {
    /// Stamp both timestamps with the current time.
    pub fn new(id: i64, fields: E) -> Self {
        let now = Utc::now();
        Record {
            id,
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full replace of the fields. `updated_at` strictly increases; `id` and `created_at` are kept.
    pub fn replace(&mut self, fields: E) {
        self.fields = fields;
        self.updated_at = Utc::now().max(self.updated_at + Duration::microseconds(1));
    }
}

impl<'r, E> FromRow<'r, PgRow> for Record<E>
where
    E: FromRow<'r, PgRow>,
{
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Record {
            id: row.try_get(ID_COLUMN)?,
            fields: E::from_row(row)?,
            created_at: row.try_get(CREATED_AT_COLUMN)?,
            updated_at: row.try_get(UPDATED_AT_COLUMN)?,
        })
    }
}
