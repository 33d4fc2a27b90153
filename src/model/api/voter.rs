use serde::{Deserialize, Serialize};

use crate::model::voter::VoterId;

/// Whether a particular identity has voted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterStatus {
    pub voter: VoterId,
    pub has_voted: bool,
}
