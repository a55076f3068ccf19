/**
 * Authentication Extractor
 *
 * Extracts and verifies the JWT from the Authorization header and hands the
 * caller's user ID to handlers. Requests without a valid token are rejected
 * with `AUTH` before the handler runs.
 */

use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from JWT token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Axum extractor for authenticated user
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl AuthUser {
    pub fn user_id(&self) -> Uuid {
        self.0.user_id
    }
}

/// Pull the bearer token out of request headers
fn bearer_token(parts: &Parts) -> Result<&str, BackendError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::auth("missing Authorization header")
        })?;

    header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        BackendError::auth("expected a Bearer token")
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user_id = state.session_keys.user_id_from_token(token).map_err(|e| {
            tracing::warn!("Invalid token: {}", e);
            e
        })?;
        Ok(AuthUser(AuthenticatedUser { user_id }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("http://example.com");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_extracted() {
        let parts = parts_with(Some("Bearer abc.def"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def");
    }

    #[test]
    fn test_missing_or_malformed_header() {
        assert_eq!(bearer_token(&parts_with(None)).unwrap_err().code(), "AUTH");
        assert_eq!(bearer_token(&parts_with(Some("Basic xyz"))).unwrap_err().code(), "AUTH");
    }
}
