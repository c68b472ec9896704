//! Request deadline middleware
//!
//! Every request runs under a wall-clock budget. When the budget runs out
//! the handler future is dropped, which cancels any in-flight database,
//! cache or object-store call, and the client receives 408.

use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;

/// Wall-clock budget for a group of routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(pub Duration);

impl Deadline {
    pub fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }
}

/// Use with `axum::middleware::from_fn_with_state(Deadline(..), enforce_deadline)`
pub async fn enforce_deadline(
    State(Deadline(budget)): State<Deadline>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    match tokio::time::timeout(budget, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(
                %method,
                path = %path,
                budget_ms = budget.as_millis() as u64,
                "Request deadline exceeded"
            );
            AppError::request_timeout("request deadline exceeded").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use tower::ServiceExt;

    fn app(budget: Duration, work: Duration) -> Router {
        Router::new()
            .route(
                "/",
                get(move || async move {
                    tokio::time::sleep(work).await;
                    "done"
                }),
            )
            .layer(from_fn_with_state(Deadline(budget), enforce_deadline))
    }

    #[tokio::test]
    async fn test_within_budget() {
        let response = app(Duration::from_millis(500), Duration::from_millis(1))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_budget_exceeded() {
        let response = app(Duration::from_millis(10), Duration::from_secs(5))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
