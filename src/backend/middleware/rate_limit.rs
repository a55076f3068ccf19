//! Mutation rate limiting
//!
//! Handlers consult a [`RateLimiter`] before every mutating operation. The
//! fixed-window limiter keeps one counter per user in memory; the server
//! prunes expired windows periodically.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::backend::error::BackendError;

/// Per-user admission check for mutations
pub trait RateLimiter: Send + Sync {
    /// Admit one mutation by `user_id`, or fail with `RATE_LIMITED`
    fn check(&self, user_id: Uuid) -> Result<(), BackendError>;

    /// Drop bookkeeping that can no longer affect a decision
    fn cleanup(&self) {}
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Allows `max_requests` mutations per user in each `window`
#[derive(Debug)]
pub struct FixedWindowRateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<Uuid, Window>>,
}

impl FixedWindowRateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Same as [`RateLimiter::check`] with an explicit clock reading
    pub fn check_at(&self, user_id: Uuid, now: Instant) -> Result<(), BackendError> {
        let mut windows = self.windows.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let entry = windows.entry(user_id).or_insert(Window { started: now, count: 0 });

        if now.duration_since(entry.started) >= self.window {
            *entry = Window { started: now, count: 0 };
        }

        if entry.count >= self.max_requests {
            let resets_in = self.window.saturating_sub(now.duration_since(entry.started));
            let retry_after_secs = resets_in.as_secs().max(1);
            tracing::warn!("User {} rate limited for {}s", user_id, retry_after_secs);
            return Err(BackendError::RateLimited { retry_after_secs });
        }

        entry.count += 1;
        Ok(())
    }

    pub fn cleanup_at(&self, now: Instant) {
        let mut windows = self.windows.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = windows.len();
        windows.retain(|_, w| now.duration_since(w.started) < self.window);
        tracing::debug!("Pruned {} expired rate limit window(s)", before - windows.len());
    }

    /// Users with a live window
    pub fn tracked_users(&self) -> usize {
        self.windows.lock().map(|w| w.len()).unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }
}

impl RateLimiter for FixedWindowRateLimiter {
    fn check(&self, user_id: Uuid) -> Result<(), BackendError> {
        self.check_at(user_id, Instant::now())
    }

    fn cleanup(&self) {
        self.cleanup_at(Instant::now());
    }
}

/// Admits everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRateLimiter;

impl RateLimiter for NoopRateLimiter {
    fn check(&self, _user_id: Uuid) -> Result<(), BackendError> {
        Ok(())
    }
}
