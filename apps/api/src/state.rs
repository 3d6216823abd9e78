use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::TokenVerifier;
use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable auth-provider client. Tests swap in a stub.
    pub verifier: Arc<dyn TokenVerifier>,
    pub submissions: SubmissionLedger,
}

/// Last-submission-wins bookkeeping. Each analysis submission takes a ticket;
/// a run whose ticket is no longer current when it finishes is discarded, so
/// a resubmit can never be overtaken by a stale result. The winning run
/// evicts its entry on finish, so the map only holds users with a submission
/// in flight.
#[derive(Clone, Default)]
pub struct SubmissionLedger {
    inner: Arc<Mutex<HashMap<Uuid, u64>>>,
}

impl SubmissionLedger {
    /// Registers a new submission for the user and returns its ticket.
    pub fn begin(&self, user_id: Uuid) -> u64 {
        let mut inner = self.inner.lock().expect("submission ledger poisoned");
        let ticket = inner.entry(user_id).or_insert(0);
        *ticket += 1;
        *ticket
    }

    /// Settles a finished run. Returns true and evicts the user's entry when
    /// no newer submission has arrived; returns false for a stale ticket
    /// (the newer run keeps the entry until it settles in turn).
    pub fn finish(&self, user_id: Uuid, ticket: u64) -> bool {
        let mut inner = self.inner.lock().expect("submission ledger poisoned");
        match inner.get(&user_id) {
            Some(current) if *current == ticket => {
                inner.remove(&user_id);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_submission_settles_as_current() {
        let ledger = SubmissionLedger::default();
        let user = Uuid::new_v4();
        let ticket = ledger.begin(user);
        assert!(ledger.finish(user, ticket));
    }

    #[test]
    fn test_resubmission_invalidates_prior_ticket() {
        let ledger = SubmissionLedger::default();
        let user = Uuid::new_v4();
        let first = ledger.begin(user);
        let second = ledger.begin(user);
        assert!(!ledger.finish(user, first));
        assert!(ledger.finish(user, second));
    }

    #[test]
    fn test_users_do_not_interfere() {
        let ledger = SubmissionLedger::default();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let alice_ticket = ledger.begin(alice);
        ledger.begin(bob);
        assert!(ledger.finish(alice, alice_ticket));
    }

    #[test]
    fn test_settled_entry_is_evicted() {
        let ledger = SubmissionLedger::default();
        let user = Uuid::new_v4();
        let ticket = ledger.begin(user);
        assert!(ledger.finish(user, ticket));
        // Entry is gone, so nothing is current for this user anymore.
        assert!(!ledger.finish(user, ticket));
    }

    #[test]
    fn test_stale_finish_keeps_newer_entry() {
        let ledger = SubmissionLedger::default();
        let user = Uuid::new_v4();
        let first = ledger.begin(user);
        let second = ledger.begin(user);
        assert!(!ledger.finish(user, first));
        assert!(ledger.finish(user, second));
    }
}
