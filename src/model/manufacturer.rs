use crate::config::{ColumnDef, ColumnType, EntitySchema, Format, ValidationRule};
use crate::model::Entity;
use crate::sql::PgBindValue;
use serde::{Deserialize, Serialize};

static SCHEMA: EntitySchema = EntitySchema {
    name: "manufacturer",
    table: "manufacturers",
    path_segment: "manufacturers",
    columns: &[
        ColumnDef::required("name", ColumnType::Text).with(ValidationRule::new().max_length(200)),
        ColumnDef::optional("country", ColumnType::Text).with(ValidationRule::new().max_length(100)),
        ColumnDef::optional("website", ColumnType::Text)
            .with(ValidationRule::new().format(Format::Url).max_length(255)),
    ],
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Manufacturer {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl Entity for Manufacturer {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn values(&self) -> Vec<PgBindValue> {
        vec![
            self.name.as_str().into(),
            (&self.country).into(),
            (&self.website).into(),
        ]
    }
}
