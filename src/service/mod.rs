//! Generic repository and request validation.

mod crud;
mod validation;
pub use crud::{PgRepository, Repository};
pub use validation::{RequestValidator, Rule, Violation};
