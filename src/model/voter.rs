use std::fmt::{Display, Formatter};

use rocket::{
    http::Status,
    request::{FromRequest, Outcome},
    Request,
};
use serde::{Deserialize, Serialize};

/// Header carrying the caller's identity.
pub const VOTER_ID_HEADER: &str = "X-Voter-Id";

/// An opaque caller identity.
///
/// Authenticating the caller is somebody else's job: whatever sits in
/// front of this server is trusted to have set [`VOTER_ID_HEADER`] correctly.
/// The header value is taken byte for byte, so `"bob"` and `" bob"` are two
/// different voters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoterId(String);

impl VoterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VoterId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VoterIdError {
    Missing,
    Empty,
}

/// Read the caller's identity from the request headers.
#[rocket::async_trait]
impl<'r> FromRequest<'r> for VoterId {
    type Error = VoterIdError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match req.headers().get_one(VOTER_ID_HEADER) {
            Some("") => Outcome::Failure((Status::Unauthorized, VoterIdError::Empty)),
            Some(id) => Outcome::Success(VoterId::new(id)),
            None => Outcome::Failure((Status::Unauthorized, VoterIdError::Missing)),
        }
    }
}
