use crate::config::{ColumnDef, ColumnType, EntitySchema, ValidationRule};
use crate::model::Entity;
use crate::sql::PgBindValue;
use serde::{Deserialize, Serialize};

static SCHEMA: EntitySchema = EntitySchema {
    name: "purchase",
    table: "purchases",
    path_segment: "purchases",
    columns: &[
        ColumnDef::required("customer_id", ColumnType::BigInt).with(ValidationRule::new().minimum(1.0)),
        ColumnDef::required("store_id", ColumnType::BigInt).with(ValidationRule::new().minimum(1.0)),
        ColumnDef::required("product_id", ColumnType::BigInt).with(ValidationRule::new().minimum(1.0)),
        ColumnDef::required("quantity", ColumnType::Integer).with(ValidationRule::new().minimum(1.0)),
    ],
};

/// One product bought by a customer at a store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub customer_id: i64,
    pub store_id: i64,
    pub product_id: i64,
    pub quantity: i32,
}

impl Entity for Purchase {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn values(&self) -> Vec<PgBindValue> {
        vec![
            self.customer_id.into(),
            self.store_id.into(),
            self.product_id.into(),
            self.quantity.into(),
        ]
    }
}
