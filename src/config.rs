use chrono::Utc;
use log::{error, info};
use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use crate::model::{election::ServerElection, voter::VoterId};

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    candidates: Vec<String>,
    voting_duration: i64,
    admin: String,
}

impl Config {
    pub fn new(candidates: Vec<String>, voting_duration: i64, admin: impl Into<String>) -> Self {
        Self {
            candidates,
            voting_duration,
            admin: admin.into(),
        }
    }

    /// Candidate names, in ballot order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// How long voting stays open after launch, in seconds.
    pub fn voting_duration(&self) -> i64 {
        self.voting_duration
    }

    /// Identity of the administrator, matched against the `X-Voter-Id` header.
    pub fn admin(&self) -> VoterId {
        VoterId::new(self.admin.clone())
    }
}

/// A fairing that loads the application config and puts it in managed state.
/// This could easily be achieved using `AdHoc::config`, but is written out
/// explicitly for symmetry with [`ElectionFairing`] and control over error
/// messages.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Manage the state.
        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// A fairing that creates the election from the managed [`Config`] and
/// places it into managed state. Voting opens as soon as this runs.
///
/// Must be attached after [`ConfigFairing`].
pub struct ElectionFairing;

#[rocket::async_trait]
impl Fairing for ElectionFairing {
    fn info(&self) -> Info {
        Info {
            name: "Election",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        let config = match rocket.state::<Config>() {
            Some(config) => config.clone(),
            None => {
                error!("Cannot create election: no config loaded");
                return Err(rocket);
            }
        };

        let election = match ServerElection::create(
            config.candidates().iter().cloned(),
            config.voting_duration(),
            config.admin(),
            Utc::now(),
        ) {
            Ok(election) => election,
            Err(e) => {
                error!("Failed to create election: {e}");
                return Err(rocket);
            }
        };
        info!("Election online, admin is {}", config.admin());

        rocket = rocket.manage(election);
        Ok(rocket)
    }
}
