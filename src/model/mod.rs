//! Data models for the election.
//!
//! - `election` holds the election state machine itself.
//! - `voter` is how the server identifies callers.
//! - `api` holds the views the server hands out.

pub mod api;
pub mod election;
pub mod voter;
