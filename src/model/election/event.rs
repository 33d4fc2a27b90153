use serde::{Deserialize, Serialize};

/// Emitted when a vote is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCast<I> {
    pub voter: I,
    pub candidate_index: usize,
}

/// Emitted when the administrator closes the election.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionEnded {}

/// Emitted straight after [`ElectionEnded`], naming the winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerDeclared {
    pub name: String,
    pub vote_count: u64,
}

/// Any notification in the election's event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum ElectionEvent<I> {
    VoteCast(VoteCast<I>),
    ElectionEnded(ElectionEnded),
    WinnerDeclared(WinnerDeclared),
}

impl<I> From<VoteCast<I>> for ElectionEvent<I> {
    fn from(event: VoteCast<I>) -> Self {
        Self::VoteCast(event)
    }
}

impl<I> From<ElectionEnded> for ElectionEvent<I> {
    fn from(event: ElectionEnded) -> Self {
        Self::ElectionEnded(event)
    }
}

impl<I> From<WinnerDeclared> for ElectionEvent<I> {
    fn from(event: WinnerDeclared) -> Self {
        Self::WinnerDeclared(event)
    }
}
