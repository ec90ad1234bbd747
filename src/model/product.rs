use crate::config::{ColumnDef, ColumnType, EntitySchema, ValidationRule};
use crate::model::Entity;
use crate::sql::PgBindValue;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

static SCHEMA: EntitySchema = EntitySchema {
    name: "product",
    table: "products",
    path_segment: "products",
    columns: &[
        ColumnDef::required("manufacturer_id", ColumnType::BigInt).with(ValidationRule::new().minimum(1.0)),
        ColumnDef::required("name", ColumnType::Text).with(ValidationRule::new().max_length(200)),
        ColumnDef::optional("description", ColumnType::Text).with(ValidationRule::new().max_length(2000)),
        ColumnDef::required("price", ColumnType::Numeric)
            .with(ValidationRule::new().minimum(0.0).maximum(9_999_999_999.99).scale(2)),
    ],
};

/// A sellable item. `price` travels as a decimal string on the wire ("19.99").
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub manufacturer_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
}

impl Entity for Product {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn values(&self) -> Vec<PgBindValue> {
        vec![
            self.manufacturer_id.into(),
            self.name.as_str().into(),
            (&self.description).into(),
            self.price.into(),
        ]
    }
}
