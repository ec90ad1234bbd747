use crate::config::{ColumnDef, ColumnType, EntitySchema, ValidationRule};
use crate::model::Entity;
use crate::sql::PgBindValue;
use serde::{Deserialize, Serialize};

static SCHEMA: EntitySchema = EntitySchema {
    name: "category",
    table: "categories",
    path_segment: "categories",
    columns: &[ColumnDef::required("name", ColumnType::Text).with(ValidationRule::new().max_length(100))],
};

/// Product category, e.g. "Liquids" or "Pod systems".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
}

impl Entity for Category {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn values(&self) -> Vec<PgBindValue> {
        vec![self.name.as_str().into()]
    }
}
