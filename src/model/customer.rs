use crate::config::{ColumnDef, ColumnType, EntitySchema, Format, ValidationRule};
use crate::model::Entity;
use crate::sql::PgBindValue;
use serde::{Deserialize, Serialize};

static SCHEMA: EntitySchema = EntitySchema {
    name: "customer",
    table: "customers",
    path_segment: "customers",
    columns: &[
        ColumnDef::required("name", ColumnType::Text).with(ValidationRule::new().max_length(200)),
        ColumnDef::required("email", ColumnType::Text)
            .with(ValidationRule::new().format(Format::Email).max_length(254)),
        ColumnDef::optional("phone", ColumnType::Text).with(ValidationRule::new().max_length(32)),
        ColumnDef::optional("address", ColumnType::Text).with(ValidationRule::new().max_length(500)),
    ],
};

/// A shop customer; `email` is required and must look like an address.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Entity for Customer {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn values(&self) -> Vec<PgBindValue> {
        vec![
            self.name.as_str().into(),
            self.email.as_str().into(),
            (&self.phone).into(),
            (&self.address).into(),
        ]
    }
}
