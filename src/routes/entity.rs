//! Entity CRUD routes: one router per entity, merged into the catalog router.
//! Identifiers travel as path parameters: `/{path_segment}/:id`.

use crate::config::ResolvedModel;
use crate::extractors::RequestTimeout;
use crate::handlers::entity::{create, delete as delete_handler, list, missing_id, read, update};
use crate::model::{Category, Customer, Delivery, Entity, Manufacturer, Product, Purchase, Store};
use crate::service::{PgRepository, Repository};
use crate::state::{AppState, EntityState};
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn entity_routes<R: Repository>(repo: Arc<R>, request_timeout: RequestTimeout) -> Router {
    let path = <R::Entity as Entity>::schema().path_segment;
    Router::new()
        .route(
            &format!("/{}", path),
            get(list::<R>).post(create::<R>).put(missing_id).delete(missing_id),
        )
        .route(
            &format!("/{}/:id", path),
            get(read::<R>).put(update::<R>).delete(delete_handler::<R>),
        )
        .with_state(EntityState {
            repo,
            request_timeout,
        })
}

fn pg_entity_routes<E: Entity>(state: &AppState, model: &ResolvedModel) -> Option<Router> {
    model.entity_by_path(E::schema().path_segment)?;
    Some(entity_routes(
        Arc::new(PgRepository::<E>::new(state.pool.clone())),
        state.request_timeout,
    ))
}

/// PostgreSQL-backed routes for every catalog entity present in the resolved model.
pub fn catalog_routes(state: &AppState, model: &ResolvedModel) -> Router {
    [
        pg_entity_routes::<Category>(state, model),
        pg_entity_routes::<Customer>(state, model),
        pg_entity_routes::<Delivery>(state, model),
        pg_entity_routes::<Manufacturer>(state, model),
        pg_entity_routes::<Product>(state, model),
        pg_entity_routes::<Purchase>(state, model),
        pg_entity_routes::<Store>(state, model),
    ]
    .into_iter()
    .flatten()
    .fold(Router::new(), |app, routes| app.merge(routes))
}
