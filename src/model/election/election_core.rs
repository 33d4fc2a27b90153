use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use serde::Serialize;

use super::candidate::{self, Candidate};
use super::error::{ElectionError, Result};
use super::event::{ElectionEnded, ElectionEvent, VoteCast, WinnerDeclared};

/// A single election, from creation to closure.
///
/// The election knows nothing about where identities or the current time
/// come from: both are passed in by the caller on every operation that
/// needs them.
///
/// Only [`Election::new`] builds one, so it can be serialised for
/// inspection but never deserialised past the construction checks.
#[derive(Debug, Clone, Serialize)]
pub struct Election<I> {
    /// The slate, in ballot order. Never grows, shrinks, or reorders.
    candidates: Vec<Candidate>,
    /// The identity that created the election.
    admin: I,
    /// Votes are refused from this instant onwards.
    deadline: DateTime<Utc>,
    /// Everyone who has voted so far.
    has_voted: HashSet<I>,
    /// Set once by the administrator, never cleared.
    ended: bool,
    /// Every notification emitted, oldest first.
    events: Vec<ElectionEvent<I>>,
}

impl<I> Election<I>
where
    I: Eq + Hash + Clone + Debug,
{
    /// Create a new election open for `duration_secs` seconds from `now`.
    pub fn new<S: Into<String>>(
        candidate_names: impl IntoIterator<Item = S>,
        duration_secs: i64,
        admin: I,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let candidates: Vec<Candidate> = candidate_names
            .into_iter()
            .map(Candidate::new)
            .collect();
        if candidates.is_empty() {
            return Err(ElectionError::InvalidConstructionArgs(
                "at least one candidate is required".to_string(),
            ));
        }
        if duration_secs <= 0 {
            return Err(ElectionError::InvalidConstructionArgs(format!(
                "voting duration must be positive, got {duration_secs}s"
            )));
        }
        let deadline = Duration::try_seconds(duration_secs)
            .and_then(|duration| now.checked_add_signed(duration))
            .ok_or_else(|| {
                ElectionError::InvalidConstructionArgs(format!(
                    "voting duration of {duration_secs}s is out of range"
                ))
            })?;

        info!(
            "Created election with {} candidates, admin {:?}, voting closes at {}",
            candidates.len(),
            admin,
            deadline
        );

        Ok(Self {
            candidates,
            admin,
            deadline,
            has_voted: HashSet::new(),
            ended: false,
            events: Vec::new(),
        })
    }

    /// Cast `voter`'s vote for the candidate at `candidate_index`.
    ///
    /// Checks are made in a fixed order and the first failure is reported:
    /// closure, then the deadline, then double voting, then the index.
    /// Nothing changes unless every check passes.
    pub fn vote(
        &mut self,
        candidate_index: usize,
        voter: I,
        now: DateTime<Utc>,
    ) -> Result<VoteCast<I>> {
        if let Err(err) = self.check_vote(candidate_index, &voter, now) {
            debug!("Rejected vote from {voter:?} for candidate {candidate_index}: {err}");
            return Err(err);
        }

        self.candidates[candidate_index].vote_count += 1;
        self.has_voted.insert(voter.clone());
        let event = VoteCast {
            voter,
            candidate_index,
        };
        self.events.push(event.clone().into());

        debug!(
            "Accepted vote from {:?} for candidate {}",
            event.voter, candidate_index
        );
        Ok(event)
    }

    fn check_vote(&self, candidate_index: usize, voter: &I, now: DateTime<Utc>) -> Result<()> {
        if self.ended {
            return Err(ElectionError::ElectionEnded);
        }
        if now >= self.deadline {
            return Err(ElectionError::VotingPeriodExpired);
        }
        if self.has_voted.contains(voter) {
            return Err(ElectionError::AlreadyVoted);
        }
        self.candidate(candidate_index)?;
        Ok(())
    }

    /// Close the election and declare the winner. Only the admin may do this,
    /// and only once; it may happen before or after the deadline.
    pub fn end_election(&mut self, caller: &I) -> Result<(ElectionEnded, WinnerDeclared)> {
        if caller != &self.admin {
            debug!("Refused closure by non-admin {caller:?}");
            return Err(ElectionError::NotAdmin);
        }
        if self.ended {
            return Err(ElectionError::ElectionEnded);
        }
        // Resolved before anything changes, so a failure leaves the election open.
        let winner = self.leading_candidate().ok_or_else(|| {
            ElectionError::InvalidConstructionArgs("election has no candidates".to_string())
        })?;

        self.ended = true;
        let ended = ElectionEnded {};
        self.events.push(ended.into());
        info!("Election closed by admin {caller:?}");

        self.events.push(winner.clone().into());
        info!(
            "Winner declared: {} with {} votes",
            winner.name, winner.vote_count
        );

        Ok((ended, winner))
    }

    /// Get the candidate at `index`.
    pub fn candidate(&self, index: usize) -> Result<&Candidate> {
        self.candidates
            .get(index)
            .ok_or(ElectionError::InvalidCandidateIndex {
                index,
                count: self.candidates.len(),
            })
    }

    /// All candidates, in ballot order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn admin(&self) -> &I {
        &self.admin
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Has the administrator closed the election?
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Would a vote at `now` get past the closure and deadline checks?
    pub fn is_voting_open(&self, now: DateTime<Utc>) -> bool {
        !self.ended && now < self.deadline
    }

    pub fn has_voted(&self, identity: &I) -> bool {
        self.has_voted.contains(identity)
    }

    /// Total number of votes accepted.
    pub fn total_votes(&self) -> u64 {
        self.candidates.iter().map(|c| c.vote_count).sum()
    }

    /// Who would win if the election closed right now.
    ///
    /// This is only a preview while voting continues; see [`Self::winner`].
    /// `None` only if there are no candidates, which [`Election::new`] rules out.
    pub fn leading_candidate(&self) -> Option<WinnerDeclared> {
        candidate::leader(&self.candidates).map(|(_, leader)| WinnerDeclared {
            name: leader.name.clone(),
            vote_count: leader.vote_count,
        })
    }

    /// The declared winner, once the election has been closed.
    pub fn winner(&self) -> Option<WinnerDeclared> {
        if self.ended {
            self.leading_candidate()
        } else {
            None
        }
    }

    /// Every notification emitted so far, oldest first.
    pub fn events(&self) -> &[ElectionEvent<I>] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN: &str = "admin";

    fn init_logging() {
        log4rs_test_utils::test_logging::init_logging_once_for(["voting_backend"], None, None);
    }

    fn start() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    impl Election<&'static str> {
        /// The three-candidate, five-second election used throughout.
        pub fn example() -> Self {
            Election::new(["Alice", "Bob", "Charlie"], 5, ADMIN, start()).unwrap()
        }
    }

    #[test]
    fn new_election_has_zeroed_candidates() {
        init_logging();
        let election = Election::example();

        assert_eq!(election.candidate_count(), 3);
        for (i, name) in ["Alice", "Bob", "Charlie"].into_iter().enumerate() {
            let candidate = election.candidate(i).unwrap();
            assert_eq!(candidate.name, name);
            assert_eq!(candidate.vote_count, 0);
        }
        assert_eq!(election.admin(), &ADMIN);
        assert_eq!(election.deadline(), start() + Duration::seconds(5));
        assert!(!election.is_ended());
        assert!(election.events().is_empty());
    }

    #[test]
    fn bad_construction_args() {
        let no_candidates: [&str; 0] = [];
        assert!(matches!(
            Election::new(no_candidates, 5, ADMIN, start()),
            Err(ElectionError::InvalidConstructionArgs(_))
        ));
        assert!(matches!(
            Election::new(["Alice"], 0, ADMIN, start()),
            Err(ElectionError::InvalidConstructionArgs(_))
        ));
        assert!(matches!(
            Election::new(["Alice"], -10, ADMIN, start()),
            Err(ElectionError::InvalidConstructionArgs(_))
        ));
        assert!(matches!(
            Election::new(["Alice"], i64::MAX, ADMIN, start()),
            Err(ElectionError::InvalidConstructionArgs(_))
        ));
    }

    #[test]
    fn duplicate_names_are_separate_candidates() {
        let mut election = Election::new(["Alice", "Alice"], 5, ADMIN, start()).unwrap();
        election.vote(1, "voter1", start()).unwrap();
        assert_eq!(election.candidate(0).unwrap().vote_count, 0);
        assert_eq!(election.candidate(1).unwrap().vote_count, 1);
    }

    #[test]
    fn vote_counts_once() {
        init_logging();
        let mut election = Election::example();

        let cast = election.vote(1, "voter1", start()).unwrap();
        assert_eq!(
            cast,
            VoteCast {
                voter: "voter1",
                candidate_index: 1
            }
        );
        assert_eq!(election.candidate(0).unwrap().vote_count, 0);
        assert_eq!(election.candidate(1).unwrap().vote_count, 1);
        assert_eq!(election.candidate(2).unwrap().vote_count, 0);
        assert!(election.has_voted(&"voter1"));
        assert!(!election.has_voted(&"voter2"));
        assert_eq!(election.events(), &[ElectionEvent::VoteCast(cast)]);
    }

    #[test]
    fn double_vote_is_rejected() {
        let mut election = Election::example();

        election.vote(0, "voter2", start()).unwrap();
        assert_eq!(
            election.vote(1, "voter2", start()),
            Err(ElectionError::AlreadyVoted)
        );
        assert_eq!(election.candidate(0).unwrap().vote_count, 1);
        assert_eq!(election.candidate(1).unwrap().vote_count, 0);
        assert_eq!(election.events().len(), 1);
    }

    #[test]
    fn invalid_index_is_rejected() {
        let mut election = Election::example();
        let before = election.clone();

        assert_eq!(
            election.vote(3, "voter3", start()),
            Err(ElectionError::InvalidCandidateIndex { index: 3, count: 3 })
        );
        assert_eq!(election.candidates(), before.candidates());
        assert!(election.events().is_empty());
        assert!(!election.has_voted(&"voter3"));
        assert!(election.candidate(3).is_err());
    }

    #[test]
    fn votes_after_deadline_are_rejected() {
        let mut election = Election::example();
        let deadline = election.deadline();

        // Last instant before the deadline still counts.
        election
            .vote(0, "early", deadline - Duration::milliseconds(1))
            .unwrap();
        assert!(!election.is_voting_open(deadline));
        assert_eq!(
            election.vote(1, "voter2", deadline),
            Err(ElectionError::VotingPeriodExpired)
        );
        assert_eq!(
            election.vote(1, "voter2", deadline + Duration::seconds(1)),
            Err(ElectionError::VotingPeriodExpired)
        );
        // The deadline alone doesn't close the election.
        assert!(!election.is_ended());
        assert_eq!(election.events().len(), 1);
    }

    #[test]
    fn vote_checks_run_in_order() {
        let mut election = Election::example();
        election.vote(0, "voter1", start()).unwrap();
        let late = election.deadline() + Duration::seconds(1);

        // Already voted and bad index: already voted wins.
        assert_eq!(
            election.vote(9, "voter1", start()),
            Err(ElectionError::AlreadyVoted)
        );
        // Expired beats both.
        assert_eq!(
            election.vote(9, "voter1", late),
            Err(ElectionError::VotingPeriodExpired)
        );
        // Ended beats everything.
        election.end_election(&ADMIN).unwrap();
        assert_eq!(
            election.vote(9, "voter1", late),
            Err(ElectionError::ElectionEnded)
        );
        assert_eq!(
            election.vote(0, "fresh", start()),
            Err(ElectionError::ElectionEnded)
        );
    }

    #[test]
    fn bob_wins() {
        init_logging();
        let mut election = Election::example();
        election.vote(0, "voter1", start()).unwrap();
        election.vote(1, "voter2", start()).unwrap();
        election.vote(1, "voter3", start()).unwrap();
        assert_eq!(election.winner(), None);

        let (ended, winner) = election.end_election(&ADMIN).unwrap();
        assert_eq!(ended, ElectionEnded {});
        let expected = WinnerDeclared {
            name: "Bob".to_string(),
            vote_count: 2,
        };
        assert_eq!(winner, expected);
        assert_eq!(election.candidate(1).unwrap().vote_count, 2);
        assert_eq!(election.winner(), Some(expected.clone()));

        let events = election.events();
        assert_eq!(events.len(), 5);
        assert_eq!(events[3], ElectionEvent::ElectionEnded(ElectionEnded {}));
        assert_eq!(events[4], ElectionEvent::WinnerDeclared(expected));
    }

    #[test]
    fn no_votes_means_first_candidate_wins() {
        let mut election = Election::example();
        let (_, winner) = election.end_election(&ADMIN).unwrap();
        assert_eq!(winner.name, "Alice");
        assert_eq!(winner.vote_count, 0);
    }

    #[test]
    fn only_admin_can_end() {
        let mut election = Election::example();
        assert_eq!(
            election.end_election(&"voter1"),
            Err(ElectionError::NotAdmin)
        );
        assert!(!election.is_ended());
        assert!(election.events().is_empty());
        assert!(election.is_voting_open(start()));
    }

    #[test]
    fn cannot_end_twice() {
        let mut election = Election::example();
        election.end_election(&ADMIN).unwrap();
        assert_eq!(
            election.end_election(&ADMIN),
            Err(ElectionError::ElectionEnded)
        );
        // Non-admins are still told they're not admin.
        assert_eq!(
            election.end_election(&"voter1"),
            Err(ElectionError::NotAdmin)
        );
        assert_eq!(election.events().len(), 2);
    }

    #[test]
    fn end_after_deadline() {
        let mut election = Election::example();
        let late = election.deadline() + Duration::seconds(1);
        election.vote(2, "voter1", start()).unwrap();

        // Past the deadline but not yet closed.
        assert_eq!(
            election.vote(0, "voter2", late),
            Err(ElectionError::VotingPeriodExpired)
        );
        assert!(!election.is_ended());

        // The admin can still close it, and from then on the closure is reported.
        let (_, winner) = election.end_election(&ADMIN).unwrap();
        assert_eq!(winner.name, "Charlie");
        assert_eq!(
            election.vote(0, "voter2", late),
            Err(ElectionError::ElectionEnded)
        );
    }

    #[test]
    fn leading_candidate_is_a_preview() {
        let mut election = Election::example();
        assert_eq!(election.leading_candidate().unwrap().name, "Alice");
        election.vote(2, "voter1", start()).unwrap();
        assert_eq!(election.leading_candidate().unwrap().name, "Charlie");
        assert_eq!(election.total_votes(), 1);
        assert_eq!(election.winner(), None);
    }

    #[test]
    fn random_out_of_range_indices_always_fail() {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        let mut election = Election::new(["Alice", "Bob", "Charlie"], 5, 0u64, start()).unwrap();
        for _ in 0..100 {
            let voter: u64 = rng.gen_range(1..1_000_000);
            let index = rng.gen_range(3..usize::MAX);
            assert_eq!(
                election.vote(index, voter, start()),
                Err(ElectionError::InvalidCandidateIndex { index, count: 3 })
            );
        }
        assert_eq!(election.total_votes(), 0);
        assert!(election.events().is_empty());
    }

    #[test]
    fn serialises_for_inspection() {
        let mut election = Election::example();
        election.vote(1, "voter1", start()).unwrap();

        let value = rocket::serde::json::to_value(&election).unwrap();
        assert_eq!(value["admin"], "admin");
        assert_eq!(value["candidates"][1]["name"], "Bob");
        assert_eq!(value["candidates"][1]["vote_count"], 1);
        assert_eq!(value["has_voted"][0], "voter1");
        assert_eq!(value["ended"], false);
        assert_eq!(value["events"][0]["event"], "VoteCast");
    }

    #[test]
    fn single_candidate_election_closes_cleanly() {
        // The smallest slate `new` accepts still resolves a winner.
        let mut election = Election::new(["Alice"], 5, ADMIN, start()).unwrap();
        let (_, winner) = election.end_election(&ADMIN).unwrap();
        assert_eq!(winner.name, "Alice");
        assert_eq!(election.winner(), Some(winner));
    }
}
