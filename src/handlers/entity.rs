//! Entity CRUD handlers, generic over the repository serving the entity.

use crate::error::AppError;
use crate::extractors::Deadline;
use crate::model::Entity;
use crate::response::{success_empty, success_many, success_one, success_one_created};
use crate::service::{Repository, RequestValidator};
use crate::state::EntityState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    let trimmed = id_str.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("id is required".into()));
    }
    match trimmed.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::BadRequest(format!("invalid id '{}'", trimmed))),
    }
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

/// Decode, validate, then deserialize a request body into the entity's fields.
fn decode_fields<E: Entity>(payload: Result<Json<Value>, JsonRejection>) -> Result<E, AppError> {
    let Json(body) = payload?;
    let body = body_to_map(body)?;
    RequestValidator::validate(&body, E::schema())?;
    serde_json::from_value(Value::Object(body)).map_err(|e| AppError::BadRequest(e.to_string()))
}

pub async fn list<R: Repository>(
    State(state): State<EntityState<R>>,
    deadline: Deadline,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.repo.list_all(deadline).await?;
    Ok(success_many(rows))
}

pub async fn create<R: Repository>(
    State(state): State<EntityState<R>>,
    deadline: Deadline,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let fields = decode_fields::<R::Entity>(payload)?;
    let row = state.repo.create(deadline, &fields).await?;
    tracing::info!(entity = <R::Entity as Entity>::schema().name, id = row.id, "created");
    Ok(success_one_created(row))
}

pub async fn read<R: Repository>(
    State(state): State<EntityState<R>>,
    deadline: Deadline,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = state.repo.get_by_id(deadline, id).await?;
    Ok(success_one(row))
}

pub async fn update<R: Repository>(
    State(state): State<EntityState<R>>,
    deadline: Deadline,
    Path(id_str): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let fields = decode_fields::<R::Entity>(payload)?;
    state.repo.update(deadline, id, &fields).await?;
    tracing::info!(entity = <R::Entity as Entity>::schema().name, id, "updated");
    Ok(success_empty())
}

pub async fn delete<R: Repository>(
    State(state): State<EntityState<R>>,
    deadline: Deadline,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.repo.delete(deadline, id).await?;
    tracing::info!(entity = <R::Entity as Entity>::schema().name, id, "deleted");
    Ok(success_empty())
}

/// PUT/DELETE on the collection path: the identifier is mandatory.
pub async fn missing_id() -> AppError {
    AppError::BadRequest("id is required".into())
}
