use std::fmt::Debug;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::election::{Election, WinnerDeclared};

use super::candidate::CandidateDesc;

/// An API-friendly snapshot of the election as seen at a given moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionSummary {
    /// Candidates in ballot order.
    pub candidates: Vec<CandidateDesc>,
    /// Votes are refused from this time onwards.
    pub deadline: DateTime<Utc>,
    /// Has the admin closed the election?
    pub ended: bool,
    /// Would a vote be accepted at the time of the snapshot (ignoring who is voting)?
    pub voting_open: bool,
    /// Total votes cast.
    pub total_votes: u64,
    /// The declared winner, once the election is closed.
    pub winner: Option<WinnerDeclared>,
}

impl ElectionSummary {
    /// Summarise `election` as of `now`.
    pub fn new<I>(election: &Election<I>, now: DateTime<Utc>) -> Self
    where
        I: Eq + Hash + Clone + Debug,
    {
        Self {
            candidates: CandidateDesc::all(election.candidates()),
            deadline: election.deadline(),
            ended: election.is_ended(),
            voting_open: election.is_voting_open(now),
            total_votes: election.total_votes(),
            winner: election.winner(),
        }
    }
}
