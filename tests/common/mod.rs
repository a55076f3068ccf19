//! Common test utilities and helpers
//!
//! This module provides shared utilities for the integration tests:
//! - Database fixtures (in-memory and file-backed)
//! - Token helpers for authenticated requests
//! - A router harness driven with `tower::ServiceExt::oneshot`

#![allow(dead_code)]

pub mod app;
pub mod auth_helpers;
pub mod database;

pub use app::*;
pub use auth_helpers::*;
pub use database::*;
