//! Authentication test helpers

use uuid::Uuid;
use xfsocial::backend::auth::SessionKeys;
use xfsocial::backend::server::ServerConfig;

/// Keys matching the default server configuration
pub fn test_keys() -> SessionKeys {
    SessionKeys::from_secret(&ServerConfig::default().jwt_secret)
}

/// Generate a bearer token for a user
pub fn test_token(user_id: Uuid) -> String {
    test_keys()
        .create_token(user_id)
        .expect("Failed to create test token")
}

/// `Authorization` header value for a user
pub fn bearer(user_id: Uuid) -> String {
    format!("Bearer {}", test_token(user_id))
}
