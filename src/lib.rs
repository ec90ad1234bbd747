//! vape-shop: schema-driven REST backend for the shop catalog on PostgreSQL.

pub mod case;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{resolve, ResolvedModel, Settings};
pub use error::{AppError, ConfigError};
pub use extractors::{Deadline, RequestTimeout};
pub use model::{catalog, Entity, Record};
pub use response::{success_many, success_one};
pub use routes::{catalog_routes, common_routes, common_routes_with_ready, entity_routes};
pub use service::{PgRepository, Repository};
pub use state::{AppState, EntityState};
pub use store::{connect, ensure_tables};
