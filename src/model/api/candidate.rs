use std::convert::Infallible;

use rocket::request::FromParam;
use serde::{Deserialize, Serialize};

use crate::model::election::Candidate;

/// A candidate index taken from the request path.
///
/// Anything that isn't a valid `usize` (negative, too large, not a number)
/// cannot name a candidate either, so it becomes an index past the end of
/// any slate. The election then rejects it with its usual error instead of
/// the route silently not matching.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CandidateIndex(pub usize);

impl<'a> FromParam<'a> for CandidateIndex {
    type Error = Infallible;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        Ok(Self(param.parse().unwrap_or(usize::MAX)))
    }
}

/// An API-friendly candidate, carrying its position on the ballot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDesc {
    /// Position on the ballot; this is what voters vote for.
    pub index: usize,
    /// Candidate name.
    pub name: String,
    /// Votes received so far.
    pub vote_count: u64,
}

impl CandidateDesc {
    pub fn new(index: usize, candidate: &Candidate) -> Self {
        Self {
            index,
            name: candidate.name.clone(),
            vote_count: candidate.vote_count,
        }
    }

    /// Describe every candidate in ballot order.
    pub fn all(candidates: &[Candidate]) -> Vec<Self> {
        candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| Self::new(index, candidate))
            .collect()
    }
}
