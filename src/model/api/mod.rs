//! API-compatible types.
//!
//! The types in this module are what the server hands out: plain views of
//! the election with no internal bookkeeping.

pub mod candidate;
pub mod election;
pub mod voter;
