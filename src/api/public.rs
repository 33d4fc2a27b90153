use chrono::Utc;
use rocket::{serde::json::Json, Route, State};

use crate::error::{Error, Result};
use crate::model::{
    api::{
        candidate::{CandidateDesc, CandidateIndex},
        election::ElectionSummary,
    },
    election::{ElectionEvent, ServerElection, WinnerDeclared},
    voter::VoterId,
};

pub fn routes() -> Vec<Route> {
    routes![summary, candidate_list, candidate_by_index, winner, event_log]
}

#[get("/election")]
async fn summary(election: &State<ServerElection>) -> Json<ElectionSummary> {
    Json(ElectionSummary::new(&*election.read(), Utc::now()))
}

#[get("/candidates")]
async fn candidate_list(election: &State<ServerElection>) -> Json<Vec<CandidateDesc>> {
    Json(CandidateDesc::all(election.read().candidates()))
}

#[get("/candidates/<index>")]
async fn candidate_by_index(
    index: CandidateIndex,
    election: &State<ServerElection>,
) -> Result<Json<CandidateDesc>> {
    let CandidateIndex(index) = index;
    let candidate = election.candidate(index)?;
    Ok(Json(CandidateDesc::new(index, &candidate)))
}

#[get("/election/winner")]
async fn winner(election: &State<ServerElection>) -> Result<Json<WinnerDeclared>> {
    election
        .read()
        .winner()
        .map(Json)
        .ok_or_else(|| Error::not_found("Winner of an election that is still open"))
}

#[get("/events")]
async fn event_log(election: &State<ServerElection>) -> Json<Vec<ElectionEvent<VoterId>>> {
    Json(election.read().events().to_vec())
}
