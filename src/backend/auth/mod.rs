//! Authentication Module
//!
//! Resolves the caller's identity from a bearer token. Users and sign-in live
//! elsewhere on the platform; this service only needs to know who is asking.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! └── sessions.rs     - JWT verification and minting
//! ```

/// JWT token generation and validation
pub mod sessions;

pub use sessions::{Claims, SessionKeys};
