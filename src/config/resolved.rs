//! Resolved model: validated schemas indexed for runtime lookup.

use crate::config::EntitySchema;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct ResolvedModel {
    pub entities: Vec<&'static EntitySchema>,
    pub entity_by_path: HashMap<&'static str, &'static EntitySchema>,
}

impl ResolvedModel {
    pub fn entity_by_path(&self, path: &str) -> Option<&'static EntitySchema> {
        self.entity_by_path.get(path).copied()
    }
}
