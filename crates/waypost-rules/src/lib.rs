//! Conditional redirect-rule evaluation.
//!
//! Given an ordered set of [`RedirectRule`](waypost_core::RedirectRule)s
//! and a [`RuntimeContext`] captured from the host, [`first_match`] selects
//! the single winning rule: ascending priority, inactive rules skipped,
//! first match short-circuits. Both halves are pure; no I/O happens here.

pub mod context;
pub mod evaluate;

pub use context::RuntimeContext;
pub use evaluate::first_match;
