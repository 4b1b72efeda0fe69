//! Resume Analysis Gateway — a stateless pass-through: extract text from an
//! uploaded document, assemble the analysis prompt, call the LLM, normalize
//! the result into a fixed schema. Rate limited per caller address via a
//! shared Redis window.

pub mod analysis;
pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod rate_limit;
