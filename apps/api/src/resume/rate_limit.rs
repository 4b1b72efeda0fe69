//! Fixed-window rate limiting for the resume gateway, keyed by caller
//! address. Backed by Redis so the window is shared across server instances
//! and survives restarts.

use async_trait::async_trait;

use crate::errors::AppError;

/// Analysis calls allowed per caller per window.
pub const RESUME_RATE_LIMIT: u32 = 50;
/// Window length in seconds.
pub const RATE_WINDOW_SECS: i64 = 3600;

/// The rate limiter seam. Carried in `AppState` as `Arc<dyn RateLimiter>` so
/// backends can be swapped without touching handler code.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Records one call for `key` and fails with `RateLimited` once the
    /// window budget is exhausted.
    async fn check(&self, key: &str) -> Result<(), AppError>;
}

/// INCR + EXPIRE fixed window in Redis. The first hit of a window creates
/// the counter and arms its expiry; the window resets when the key lapses.
pub struct RedisRateLimiter {
    client: redis::Client,
    limit: u32,
    window_secs: i64,
}

impl RedisRateLimiter {
    pub fn new(client: redis::Client) -> Self {
        Self {
            client,
            limit: RESUME_RATE_LIMIT,
            window_secs: RATE_WINDOW_SECS,
        }
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check(&self, key: &str) -> Result<(), AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let bucket = format!("rate:resume:{key}");

        let count: i64 = redis::cmd("INCR").arg(&bucket).query_async(&mut conn).await?;
        if count == 1 {
            let _: () = redis::cmd("EXPIRE")
                .arg(&bucket)
                .arg(self.window_secs)
                .query_async(&mut conn)
                .await?;
        }

        if count > i64::from(self.limit) {
            return Err(AppError::RateLimited);
        }
        Ok(())
    }
}
