use thiserror::Error;

/// Reasons an election operation can be refused.
///
/// Every variant is a permanent failure for the given inputs: retrying the
/// same call against the same state will fail the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElectionError {
    /// The election could not be created from the given arguments.
    #[error("Invalid election arguments: {0}")]
    InvalidConstructionArgs(String),
    /// The administrator has already closed the election.
    #[error("Election already ended")]
    ElectionEnded,
    /// The deadline has passed but nobody has closed the election yet.
    #[error("Voting period has ended")]
    VotingPeriodExpired,
    /// This identity has already cast its vote.
    #[error("You have already voted")]
    AlreadyVoted,
    /// No candidate exists at this index.
    #[error("Invalid candidate ID. Indices run from 0 to {count} exclusive")]
    InvalidCandidateIndex { index: usize, count: usize },
    /// Only the administrator may close the election.
    #[error("Only admin can end the election")]
    NotAdmin,
}

impl ElectionError {
    /// A stable machine-readable name for this kind of error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidConstructionArgs(_) => "InvalidConstructionArgs",
            Self::ElectionEnded => "ElectionEnded",
            Self::VotingPeriodExpired => "VotingPeriodExpired",
            Self::AlreadyVoted => "AlreadyVoted",
            Self::InvalidCandidateIndex { .. } => "InvalidCandidateIndex",
            Self::NotAdmin => "NotAdmin",
        }
    }
}

pub type Result<T> = std::result::Result<T, ElectionError>;
