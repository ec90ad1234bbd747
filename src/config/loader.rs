//! Build the resolved model from the static entity schemas.

use crate::config::{validate, EntitySchema, ResolvedModel};
use crate::error::ConfigError;

/// Validate schemas and index them by route segment. Call once at startup.
pub fn resolve(schemas: &[&'static EntitySchema]) -> Result<ResolvedModel, ConfigError> {
    validate(schemas)?;
    let entity_by_path = schemas.iter().map(|s| (s.path_segment, *s)).collect();
    Ok(ResolvedModel {
        entities: schemas.to_vec(),
        entity_by_path,
    })
}
