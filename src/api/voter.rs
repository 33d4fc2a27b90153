use chrono::Utc;
use log::info;
use rocket::{serde::json::Json, Route, State};

use crate::error::Result;
use crate::logging::RequestId;
use crate::model::{
    api::{candidate::CandidateIndex, voter::VoterStatus},
    election::{ServerElection, VoteCast},
    voter::VoterId,
};

pub fn routes() -> Vec<Route> {
    routes![cast_vote, voter_status]
}

#[post("/candidates/<index>/vote")]
async fn cast_vote(
    id: &RequestId,
    index: CandidateIndex,
    voter: VoterId,
    election: &State<ServerElection>,
) -> Result<Json<VoteCast<VoterId>>> {
    let CandidateIndex(index) = index;
    let cast = election.vote(index, voter, Utc::now())?;
    info!("req{id} vote recorded for candidate {index}");
    Ok(Json(cast))
}

#[get("/voter/status")]
async fn voter_status(voter: VoterId, election: &State<ServerElection>) -> Json<VoterStatus> {
    let has_voted = election.read().has_voted(&voter);
    Json(VoterStatus { voter, has_voted })
}
