pub use candidate::Candidate;
pub use election_core::Election;
pub use error::ElectionError;
pub use event::{ElectionEnded, ElectionEvent, VoteCast, WinnerDeclared};
pub use handle::ElectionHandle;

mod candidate;
mod election_core;
mod error;
mod event;
mod handle;

/// Convenience wrapper for the election as hosted by the server, where
/// callers are identified by [`VoterId`](crate::model::voter::VoterId).
pub type ServerElection = ElectionHandle<crate::model::voter::VoterId>;
