//! Generic CRUD contract and its PostgreSQL implementation.

use crate::error::AppError;
use crate::extractors::Deadline;
use crate::model::{Entity, Record};
use crate::sql::{delete, insert, select_by_id, select_list, update, QueryBuf};
use async_trait::async_trait;
use sqlx::PgPool;
use std::marker::PhantomData;

/// Data access for one entity type.
///
/// Implementations never log; failures come back as `AppError::NotFound`, `AppError::Db`,
/// `AppError::Timeout` or `AppError::Config`. Every call is bounded by the caller's deadline.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    type Entity: Entity;

    /// All rows ordered by id; an empty table yields an empty vec.
    async fn list_all(&self, deadline: Deadline) -> Result<Vec<Record<Self::Entity>>, AppError>;

    async fn get_by_id(&self, deadline: Deadline, id: i64) -> Result<Record<Self::Entity>, AppError>;

    /// Insert and return the stored row, including the generated id and timestamps.
    async fn create(&self, deadline: Deadline, fields: &Self::Entity) -> Result<Record<Self::Entity>, AppError>;

    /// Full replace. A missing id is `NotFound`, never a silent success.
    async fn update(&self, deadline: Deadline, id: i64, fields: &Self::Entity) -> Result<(), AppError>;

    /// Hard delete. A missing id is `NotFound`.
    async fn delete(&self, deadline: Deadline, id: i64) -> Result<(), AppError>;
}

fn not_found<E: Entity>(id: i64) -> AppError {
    AppError::NotFound(format!("{} {}", E::schema().name, id))
}

/// A keyed write that touched no row means the id does not exist.
fn expect_affected<E: Entity>(id: i64, rows_affected: u64) -> Result<(), AppError> {
    match rows_affected {
        0 => Err(not_found::<E>(id)),
        _ => Ok(()),
    }
}

pub struct PgRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> PgRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        PgRepository {
            pool,
            _entity: PhantomData,
        }
    }
}

impl<E> Clone for PgRepository<E> {
    fn clone(&self) -> Self {
        PgRepository::new(self.pool.clone())
    }
}

impl<E: Entity> PgRepository<E> {
    async fn fetch_all(&self, deadline: Deadline, q: QueryBuf) -> Result<Vec<Record<E>>, AppError> {
        let mut query = sqlx::query_as::<_, Record<E>>(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        deadline.run(query.fetch_all(&self.pool)).await
    }

    async fn fetch_optional(&self, deadline: Deadline, q: QueryBuf) -> Result<Option<Record<E>>, AppError> {
        let mut query = sqlx::query_as::<_, Record<E>>(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        deadline.run(query.fetch_optional(&self.pool)).await
    }

    /// Execute a write and return the affected row count.
    async fn execute(&self, deadline: Deadline, q: QueryBuf) -> Result<u64, AppError> {
        let mut query = sqlx::query(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        let result = deadline.run(query.execute(&self.pool)).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl<E: Entity> Repository for PgRepository<E> {
    type Entity = E;

    async fn list_all(&self, deadline: Deadline) -> Result<Vec<Record<E>>, AppError> {
        self.fetch_all(deadline, select_list(E::schema())).await
    }

    async fn get_by_id(&self, deadline: Deadline, id: i64) -> Result<Record<E>, AppError> {
        self.fetch_optional(deadline, select_by_id(E::schema(), id))
            .await?
            .ok_or_else(|| not_found::<E>(id))
    }

    async fn create(&self, deadline: Deadline, fields: &E) -> Result<Record<E>, AppError> {
        let q = insert(E::schema(), fields.values())?;
        // RETURNING always yields the inserted row
        self.fetch_optional(deadline, q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn update(&self, deadline: Deadline, id: i64, fields: &E) -> Result<(), AppError> {
        let q = update(E::schema(), id, fields.values())?;
        let rows = self.execute(deadline, q).await?;
        expect_affected::<E>(id, rows)
    }

    async fn delete(&self, deadline: Deadline, id: i64) -> Result<(), AppError> {
        let rows = self.execute(deadline, delete(E::schema(), id)).await?;
        expect_affected::<E>(id, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Purchase};

    #[test]
    fn zero_affected_rows_is_not_found() {
        match expect_affected::<Category>(42, 0) {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "category 42"),
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(matches!(expect_affected::<Purchase>(7, 0), Err(AppError::NotFound(_))));
    }

    #[test]
    fn any_affected_row_is_success() {
        assert!(expect_affected::<Category>(1, 1).is_ok());
        assert!(expect_affected::<Category>(1, 3).is_ok());
    }
}
