//! Retry policy for connection-class database failures.
//!
//! Poolers (pgbouncer in transaction mode in particular) drop connections
//! and lose prepared statements under us. Those failures are worth another
//! attempt on a fresh connection; everything else is returned as-is.

use std::time::Duration;

use crate::config::DatabaseConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
            max_delay: Duration::from_millis(config.retry_max_delay_ms),
        }
    }

    /// Backoff before retry number `attempt` (zero based): base * 2^attempt,
    /// capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// SQLSTATEs that mean the connection, not the statement, is broken.
fn is_connection_sqlstate(code: &str) -> bool {
    code.starts_with("08")                  // connection exception
        || matches!(
            code,
            "57P01" | "57P02" | "57P03"      // admin/crash shutdown, cannot connect now
            | "53300"                        // too many connections
            | "26000"                        // prepared statement does not exist
            | "42P05"                        // prepared statement already exists
        )
}

pub fn is_retryable(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(db) => db.code().map(|c| is_connection_sqlstate(&c)).unwrap_or(false),
        _ => false,
    }
}

/// Errors after which the pool itself is rebuilt rather than just retried.
pub fn needs_reconnect(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolClosed | sqlx::Error::Protocol(_) | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(db) => db
            .code()
            .map(|c| matches!(&*c, "26000" | "42P05") || c.starts_with("08"))
            .unwrap_or(false),
        _ => false,
    }
}
