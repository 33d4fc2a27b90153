use log::debug;
use rocket::{
    http::Status,
    response::{self, status::Custom, Responder},
    serde::json::Json,
    Catcher, Request,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{election::ElectionError, voter::VOTER_ID_HEADER};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Election(#[from] ElectionError),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// The HTTP status this error is reported with.
    pub fn status(&self) -> Status {
        match self {
            Self::Election(err) => match err {
                ElectionError::InvalidConstructionArgs(_) => Status::BadRequest,
                ElectionError::ElectionEnded | ElectionError::VotingPeriodExpired => {
                    Status::Forbidden
                }
                ElectionError::AlreadyVoted => Status::Conflict,
                ElectionError::InvalidCandidateIndex { .. } => Status::NotFound,
                ElectionError::NotAdmin => Status::Forbidden,
            },
            Self::NotFound(_) => Status::NotFound,
        }
    }

    /// A stable machine-readable name for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Election(err) => err.kind(),
            Self::NotFound(_) => "NotFound",
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        debug!("{} {} refused: {self}", req.method(), req.uri());
        let body = ErrorBody {
            error: self.kind().to_string(),
            message: self.to_string(),
        };
        Custom(status, Json(body)).respond_to(req)
    }
}

/// Error bodies for requests that never reached a handler.
pub fn catchers() -> Vec<Catcher> {
    catchers![unauthorized, fallback]
}

#[catch(401)]
fn unauthorized() -> Custom<Json<ErrorBody>> {
    let body = ErrorBody {
        error: "Unauthorized".to_string(),
        message: format!("A non-empty {VOTER_ID_HEADER} header is required"),
    };
    Custom(Status::Unauthorized, Json(body))
}

#[catch(default)]
fn fallback(status: Status, req: &Request) -> Custom<Json<ErrorBody>> {
    let reason = status.reason_lossy();
    let body = ErrorBody {
        error: reason.replace(' ', ""),
        message: format!("{reason}: {} {}", req.method(), req.uri()),
    };
    Custom(status, Json(body))
}
