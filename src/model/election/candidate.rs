use serde::{Deserialize, Serialize};

/// A single option on the ballot, addressed by its position in the election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Candidate name. Not necessarily unique.
    pub name: String,
    /// Votes received so far.
    pub vote_count: u64,
}

impl Candidate {
    /// Create a candidate with no votes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vote_count: 0,
        }
    }
}

/// Find the candidate with the most votes, preferring the lowest index on ties.
///
/// Returns `None` only for an empty slice.
pub(super) fn leader(candidates: &[Candidate]) -> Option<(usize, &Candidate)> {
    let mut iter = candidates.iter().enumerate();
    let mut best = iter.next()?;
    for (index, candidate) in iter {
        // Strictly greater, so earlier candidates keep the lead on a tie.
        if candidate.vote_count > best.1.vote_count {
            best = (index, candidate);
        }
    }
    Some(best)
}
