//! Daily Task Service — the per-user, per-day points ledger.
//!
//! A ledger entry holds up to three sub-tasks; completing one awards a fixed
//! number of points to both the entry and the owning user's aggregate total,
//! atomically. The pure state machine lives in `subtasks`, day bucketing in
//! `day_window`, and the SQL orchestration in `service`.

pub mod day_window;
pub mod handlers;
pub mod service;
pub mod subtasks;
