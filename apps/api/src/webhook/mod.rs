//! Clerk webhook intake — the only write path that creates users. Payloads
//! are verified against the shared webhook secret before anything is
//! touched.

pub mod handlers;
pub mod signature;
