use crate::config::{ColumnDef, ColumnType, EntitySchema, ValidationRule};
use crate::model::Entity;
use crate::sql::PgBindValue;
use serde::{Deserialize, Serialize};

static SCHEMA: EntitySchema = EntitySchema {
    name: "store",
    table: "stores",
    path_segment: "stores",
    columns: &[
        ColumnDef::required("name", ColumnType::Text).with(ValidationRule::new().max_length(200)),
        ColumnDef::optional("address", ColumnType::Text).with(ValidationRule::new().max_length(500)),
    ],
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl Entity for Store {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn values(&self) -> Vec<PgBindValue> {
        vec![self.name.as_str().into(), (&self.address).into()]
    }
}
