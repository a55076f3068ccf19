/**
 * Request Extractors
 *
 * Wrappers around axum's `Json`, `Query` and `Path` extractors that reject
 * malformed input with a `VALIDATION` error in the standard JSON error body
 * instead of axum's plain-text rejections.
 */

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::backend::error::BackendError;

/// JSON request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

/// Query string parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

/// URL path parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        BackendError::validation("body", rejection.body_text())
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        BackendError::validation("query", rejection.body_text())
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        BackendError::validation("path", rejection.body_text())
    }
}

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use crate::shared::comments::{CreateCommentRequest, ListCommentsQuery};

    #[tokio::test]
    async fn test_mistyped_body_is_validation() {
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text":5}"#))
            .unwrap();

        let err = ApiJson::<CreateCommentRequest>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION");
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_query_is_validation() {
        let mut parts = axum::http::Request::builder()
            .uri("/?limit=-1")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let err = ApiQuery::<ListCommentsQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION");
    }

    #[tokio::test]
    async fn test_well_formed_query_passes() {
        let mut parts = axum::http::Request::builder()
            .uri("/?limit=5&maxDepth=1")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let ApiQuery(query) = ApiQuery::<ListCommentsQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(query.limit, Some(5));
        assert_eq!(query.max_depth, Some(1));
    }
}
