//! Middleware Module
//!
//! Request-level concerns that run before handlers do their work.
//!
//! - **`auth`** - `AuthUser` extractor resolving the caller from a bearer token
//! - **`extract`** - `Json`/`Query`/`Path` wrappers that reject with `VALIDATION`
//! - **`rate_limit`** - Per-user mutation budget checked by mutating handlers

pub mod auth;
pub mod extract;
pub mod rate_limit;

pub use auth::{AuthUser, AuthenticatedUser};
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use rate_limit::{FixedWindowRateLimiter, NoopRateLimiter, RateLimiter};
