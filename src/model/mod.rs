//! Catalog entities. Each noun is a plain field struct plus a static schema;
//! persisted rows are `Record<E>`.

mod category;
mod customer;
mod delivery;
mod manufacturer;
mod product;
mod purchase;
mod record;
mod store;

pub use category::Category;
pub use customer::Customer;
pub use delivery::{Delivery, DELIVERY_STATUSES};
pub use manufacturer::Manufacturer;
pub use product::Product;
pub use purchase::Purchase;
pub use record::Record;
pub use store::Store;

use crate::config::EntitySchema;
use crate::sql::PgBindValue;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::postgres::PgRow;
use sqlx::FromRow;
use std::fmt::Debug;

/// A domain record type the generic repository and handlers can serve.
///
/// `values` must yield one value per `schema().columns` entry, in the same order;
/// the row decoder reads the same columns by name.
pub trait Entity:
    Serialize + DeserializeOwned + for<'r> FromRow<'r, PgRow> + Clone + Debug + Send + Sync + Unpin + 'static
{
    fn schema() -> &'static EntitySchema;

    fn values(&self) -> Vec<PgBindValue>;
}

/// Every entity schema served by the API.
pub fn catalog() -> Vec<&'static EntitySchema> {
    vec![
        Category::schema(),
        Customer::schema(),
        Delivery::schema(),
        Manufacturer::schema(),
        Product::schema(),
        Purchase::schema(),
        Store::schema(),
    ]
}
