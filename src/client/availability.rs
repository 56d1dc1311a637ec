use crate::models::{Availability, CheckOutcome};

use super::error::ClientError;

const CHECK_FALLBACK_MESSAGE: &str = "Error checking username";

/// Issues the uniqueness lookup for a candidate username.
pub trait UsernameLookup {
    async fn check(&self, username: &str) -> Result<CheckOutcome, ClientError>;
}

/// Handle for one in-flight check. A resolve with a stale ticket (one
/// superseded by a later `begin`) is discarded, so out-of-order
/// responses can never overwrite the result for the current input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Tracks the in-flight/result state of the debounced username check.
pub struct AvailabilityChecker<L> {
    lookup: L,
    seq: u64,
    checking: bool,
    outcome: Option<CheckOutcome>,
}

impl<L: UsernameLookup> AvailabilityChecker<L> {
    pub fn new(lookup: L) -> Self {
        AvailabilityChecker {
            lookup,
            seq: 0,
            checking: false,
            outcome: None,
        }
    }

    /// Starts a check for a new debounced value. Returns `None` for the
    /// empty string, which never triggers a lookup.
    pub fn begin(&mut self, username: &str) -> Option<Ticket> {
        if username.is_empty() {
            return None;
        }

        self.seq += 1;
        self.checking = true;
        self.outcome = None;
        Some(Ticket(self.seq))
    }

    /// Applies a settled lookup. Only the ticket for the most recent
    /// `begin` is honored; `checking` clears whenever the current ticket
    /// settles, success or failure.
    pub fn resolve(&mut self, ticket: Ticket, result: Result<CheckOutcome, ClientError>) {
        if ticket.0 != self.seq {
            return;
        }

        self.checking = false;
        self.outcome = Some(match result {
            Ok(outcome) => outcome,
            Err(err) => CheckOutcome {
                status: Availability::Error,
                message: err.message_or(CHECK_FALLBACK_MESSAGE).to_string(),
            },
        });
    }

    /// Runs one full check: begin, lookup, resolve.
    pub async fn check(&mut self, username: &str) {
        let Some(ticket) = self.begin(username) else {
            return;
        };
        let result = self.lookup.check(username).await;
        self.resolve(ticket, result);
    }

    pub fn is_checking(&self) -> bool {
        self.checking
    }

    pub fn outcome(&self) -> Option<&CheckOutcome> {
        self.outcome.as_ref()
    }
}
