//! Per-request deadline handed to every repository call.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::convert::Infallible;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Optional caller budget in milliseconds. Can only shorten the configured timeout.
pub const REQUEST_TIMEOUT_HEADER: &str = "x-request-timeout-ms";

/// Server-side upper bound for store work on behalf of one request.
#[derive(Clone, Copy, Debug)]
pub struct RequestTimeout(pub Duration);

#[derive(Clone, Copy, Debug)]
pub struct Deadline(Instant);

impl Deadline {
    pub fn after(timeout: Duration) -> Self {
        Deadline(Instant::now() + timeout)
    }

    pub fn instant(&self) -> Instant {
        self.0
    }

    /// Drive `fut` until it completes or the deadline passes.
    pub async fn run<F, T, E>(self, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, E>>,
        AppError: From<E>,
    {
        match tokio::time::timeout_at(self.0, fut).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => Err(AppError::Timeout),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Deadline
where
    S: Send + Sync,
    RequestTimeout: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let configured = RequestTimeout::from_ref(state).0;
        let requested = parts
            .headers
            .get(REQUEST_TIMEOUT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_millis);
        let timeout = requested.map_or(configured, |r| r.min(configured));
        Ok(Deadline::after(timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Deadline {
        let mut builder = Request::builder().uri("/categories");
        if let Some(h) = header {
            builder = builder.header(REQUEST_TIMEOUT_HEADER, h);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        let state = RequestTimeout(Duration::from_secs(10));
        Deadline::from_request_parts(&mut parts, &state).await.unwrap()
    }

    #[tokio::test]
    async fn caller_can_only_shorten_the_budget() {
        let now = Instant::now();
        let short = extract(Some("100")).await;
        assert!(short.instant() <= now + Duration::from_secs(1));

        let capped = extract(Some("600000")).await;
        assert!(capped.instant() <= Instant::now() + Duration::from_secs(10));

        let garbage = extract(Some("soon")).await;
        assert!(garbage.instant() > now + Duration::from_secs(5));
    }

    #[tokio::test]
    async fn expired_deadline_yields_timeout() {
        let deadline = Deadline::after(Duration::from_millis(5));
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, sqlx::Error>(())
        };
        assert!(matches!(deadline.run(slow).await, Err(AppError::Timeout)));

        let fast = async { Err::<(), _>(sqlx::Error::RowNotFound) };
        let deadline = Deadline::after(Duration::from_secs(5));
        assert!(matches!(deadline.run(fast).await, Err(AppError::Db(_))));
    }
}
