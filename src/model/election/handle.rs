use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use chrono::{DateTime, Utc};

use super::election_core::Election;
use super::error::Result;
use super::event::{ElectionEnded, VoteCast, WinnerDeclared};
use super::Candidate;

/// A thread-safe handle to a single election.
///
/// Votes and closure take the write lock, so each one is applied in full
/// before any other operation can see the election. Queries share the
/// read lock.
#[derive(Debug)]
pub struct ElectionHandle<I> {
    election: RwLock<Election<I>>,
}

impl<I> ElectionHandle<I>
where
    I: Eq + Hash + Clone + Debug,
{
    /// Create a new election and wrap it in a handle. See [`Election::new`].
    pub fn create<S: Into<String>>(
        candidate_names: impl IntoIterator<Item = S>,
        duration_secs: i64,
        admin: I,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        Election::new(candidate_names, duration_secs, admin, now).map(Self::from)
    }

    /// See [`Election::vote`].
    pub fn vote(
        &self,
        candidate_index: usize,
        voter: I,
        now: DateTime<Utc>,
    ) -> Result<VoteCast<I>> {
        self.election
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .vote(candidate_index, voter, now)
    }

    /// See [`Election::end_election`].
    pub fn end_election(&self, caller: &I) -> Result<(ElectionEnded, WinnerDeclared)> {
        self.election
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .end_election(caller)
    }

    /// See [`Election::candidate`].
    pub fn candidate(&self, index: usize) -> Result<Candidate> {
        self.read().candidate(index).cloned()
    }

    /// Get shared access to the election for queries.
    ///
    /// Mutations wait until the guard is dropped, so don't hold it for long.
    pub fn read(&self) -> RwLockReadGuard<'_, Election<I>> {
        // Mutations validate before touching state, so a poisoned lock never
        // guards a half-applied operation.
        self.election.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<I> From<Election<I>> for ElectionHandle<I> {
    fn from(election: Election<I>) -> Self {
        Self {
            election: RwLock::new(election),
        }
    }
}
