use std::sync::Arc;

use sqlx::PgPool;

use crate::clock::Clock;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::resume::rate_limit::RateLimiter;
use crate::tasks::day_window::DayWindow;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Shared rate limiter for the resume gateway. Redis-backed in production
    /// so the window survives restarts and spans server instances.
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub llm: LlmClient,
    pub config: Config,
    /// Injectable time source for day-boundary resolution.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// The current calendar-day window under the configured boundary offset.
    pub fn day_window(&self) -> DayWindow {
        DayWindow::containing(self.clock.now_utc(), self.config.day_boundary_offset)
    }
}
