use crate::config::{ColumnDef, ColumnType, EntitySchema, ValidationRule};
use crate::model::Entity;
use crate::sql::PgBindValue;
use serde::{Deserialize, Serialize};

/// Accepted values for `Delivery::status`.
pub const DELIVERY_STATUSES: &[&str] = &["pending", "shipped", "delivered", "cancelled"];

static SCHEMA: EntitySchema = EntitySchema {
    name: "delivery",
    table: "deliveries",
    path_segment: "deliveries",
    columns: &[
        ColumnDef::required("customer_id", ColumnType::BigInt).with(ValidationRule::new().minimum(1.0)),
        ColumnDef::required("store_id", ColumnType::BigInt).with(ValidationRule::new().minimum(1.0)),
        ColumnDef::required("address", ColumnType::Text).with(ValidationRule::new().max_length(500)),
        ColumnDef::required("status", ColumnType::Text).with(ValidationRule::new().allowed(DELIVERY_STATUSES)),
    ],
};

/// Shipment of a customer's order from a store.
///
/// `customer_id` and `store_id` are carried through as-is; the referenced rows are not checked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub customer_id: i64,
    pub store_id: i64,
    pub address: String,
    pub status: String,
}

impl Entity for Delivery {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn values(&self) -> Vec<PgBindValue> {
        vec![
            self.customer_id.into(),
            self.store_id.into(),
            self.address.as_str().into(),
            self.status.as_str().into(),
        ]
    }
}
