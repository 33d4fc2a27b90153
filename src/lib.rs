#[macro_use]
extern crate rocket;

use rocket::{Build, Rocket};

use crate::config::{ConfigFairing, ElectionFairing};
use crate::logging::LoggerFairing;
use crate::model::election::ServerElection;

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

pub use config::Config;

/// Build the server: load the config, open the election, and mount the routes.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .attach(ConfigFairing)
        .attach(ElectionFairing)
        .attach(LoggerFairing)
        .mount("/", api::routes())
        .register("/", error::catchers())
}

/// Build a server around an existing election, bypassing the config.
pub fn rocket_for_election(election: ServerElection) -> Rocket<Build> {
    rocket::build()
        .attach(LoggerFairing)
        .manage(election)
        .mount("/", api::routes())
        .register("/", error::catchers())
}

#[cfg(test)]
fn example_election() -> model::election::Election<model::voter::VoterId> {
    use chrono::Utc;

    use crate::model::{election::Election, voter::VoterId};

    Election::new(
        ["Alice", "Bob", "Charlie"],
        5,
        VoterId::new("admin"),
        Utc::now(),
    )
    .unwrap()
}

#[cfg(test)]
async fn client_for(
    election: model::election::Election<model::voter::VoterId>,
) -> rocket::local::asynchronous::Client {
    log4rs_test_utils::test_logging::init_logging_once_for(["voting_backend"], None, None);
    rocket::local::asynchronous::Client::tracked(rocket_for_election(election.into()))
        .await
        .unwrap()
}
