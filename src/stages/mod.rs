//! The seven pipeline stages, in dependency order.
//!
//! - [`topics`]: parse the request into topics
//! - [`research`]: synthesize articles from topics
//! - [`verification`]: multi-check credibility scoring
//! - [`validation`]: scientific method assessment
//! - [`brainstorm`]: idea generation from verified articles
//! - [`pmops`]: six-role consensus protocol
//! - [`truths`]: compile double-gated verified truths
//!
//! Control flows strictly forward: stage N's output is stage N+1's
//! input, and no stage re-invokes an earlier one. Every stage is a
//! pure, synchronous function; the orchestrator in
//! [`crate::pipeline`] sequences them.

pub mod brainstorm;
pub mod pmops;
pub mod research;
pub mod topics;
pub mod truths;
pub mod validation;
pub mod verification;
