use log::info;
use rocket::{serde::json::Json, Route, State};

use crate::error::Result;
use crate::logging::RequestId;
use crate::model::{
    election::{ElectionEvent, ServerElection},
    voter::VoterId,
};

pub fn routes() -> Vec<Route> {
    routes![end_election]
}

/// Close the election. Responds with the closure notifications, in the
/// order they were emitted.
#[post("/election/end")]
async fn end_election(
    id: &RequestId,
    caller: VoterId,
    election: &State<ServerElection>,
) -> Result<Json<Vec<ElectionEvent<VoterId>>>> {
    let (ended, winner) = election.end_election(&caller)?;
    info!(
        "req{id} election closed, {} wins with {} votes",
        winner.name, winner.vote_count
    );
    Ok(Json(vec![ended.into(), winner.into()]))
}
