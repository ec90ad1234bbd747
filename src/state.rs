//! Shared state: the pool for process-level routes, one repository per entity router.

use crate::extractors::RequestTimeout;
use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub request_timeout: RequestTimeout,
}

/// State of one entity's router. `R` is the repository serving that entity.
pub struct EntityState<R> {
    pub repo: Arc<R>,
    pub request_timeout: RequestTimeout,
}

impl<R> Clone for EntityState<R> {
    fn clone(&self) -> Self {
        EntityState {
            repo: Arc::clone(&self.repo),
            request_timeout: self.request_timeout,
        }
    }
}

impl FromRef<AppState> for RequestTimeout {
    fn from_ref(state: &AppState) -> Self {
        state.request_timeout
    }
}

impl<R> FromRef<EntityState<R>> for RequestTimeout {
    fn from_ref(state: &EntityState<R>) -> Self {
        state.request_timeout
    }
}
