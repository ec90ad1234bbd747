//! In-memory repository and request helpers shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;
use vape_shop::{entity_routes, AppError, Deadline, Entity, Record, Repository, RequestTimeout};

struct Table<E> {
    next_id: i64,
    rows: BTreeMap<i64, Record<E>>,
}

/// Same contract as the PostgreSQL repository, kept in a map. Counts writes so tests
/// can assert that rejected requests never reach the store.
pub struct MemoryRepository<E> {
    table: Mutex<Table<E>>,
    writes: AtomicU64,
    _entity: PhantomData<fn() -> E>,
}

impl<E> MemoryRepository<E> {
    pub fn new() -> Self {
        MemoryRepository {
            table: Mutex::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
            writes: AtomicU64::new(0),
            _entity: PhantomData,
        }
    }

    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }
}

fn not_found<E: Entity>(id: i64) -> AppError {
    AppError::NotFound(format!("{} {}", E::schema().name, id))
}

#[async_trait]
impl<E: Entity> Repository for MemoryRepository<E> {
    type Entity = E;

    async fn list_all(&self, _deadline: Deadline) -> Result<Vec<Record<E>>, AppError> {
        Ok(self.table.lock().unwrap().rows.values().cloned().collect())
    }

    async fn get_by_id(&self, _deadline: Deadline, id: i64) -> Result<Record<E>, AppError> {
        let table = self.table.lock().unwrap();
        table.rows.get(&id).cloned().ok_or_else(|| not_found::<E>(id))
    }

    async fn create(&self, _deadline: Deadline, fields: &E) -> Result<Record<E>, AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut table = self.table.lock().unwrap();
        let id = table.next_id;
        table.next_id += 1;
        let record = Record::new(id, fields.clone());
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, _deadline: Deadline, id: i64, fields: &E) -> Result<(), AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut table = self.table.lock().unwrap();
        let record = table.rows.get_mut(&id).ok_or_else(|| not_found::<E>(id))?;
        record.replace(fields.clone());
        Ok(())
    }

    async fn delete(&self, _deadline: Deadline, id: i64) -> Result<(), AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut table = self.table.lock().unwrap();
        table.rows.remove(&id).map(|_| ()).ok_or_else(|| not_found::<E>(id))
    }
}

/// Router for one entity over a fresh in-memory repository.
pub fn memory_router<E: Entity>() -> (Router, Arc<MemoryRepository<E>>) {
    let repo = Arc::new(MemoryRepository::<E>::new());
    let router = entity_routes(Arc::clone(&repo), RequestTimeout(Duration::from_secs(5)));
    (router, repo)
}

pub async fn api(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let body = match body {
        Some(v) => Body::from(serde_json::to_string(&v).unwrap()),
        None => Body::empty(),
    };
    send(router, builder.body(body).unwrap()).await
}

pub async fn send(router: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}
