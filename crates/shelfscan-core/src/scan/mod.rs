//! Scan coordination: frame intake, identifier lookup, scan outcomes

mod session;

pub use session::ScanSession;

use std::time::Duration;

use crate::domain::BookSearchResult;

/// Current position of a scan session.
///
/// Exactly one state is active at a time; every state is reachable from
/// every other through explicit actions (frames, lookup outcomes,
/// [`ScanSession::resume_scanning`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanState {
    /// Consuming frames, waiting for a candidate identifier.
    Scanning,
    /// One lookup in flight; frames are dropped.
    Loading,
    /// Identified a book that is not in the user's library yet.
    MatchFound(BookSearchResult),
    /// Identified a book the user has already cataloged.
    MatchAlreadySaved(BookSearchResult),
    /// Lookup miss, failure, or timeout.
    MatchNotFound,
}

/// One-shot notifications from a scan session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanEvent {
    /// The identified record was persisted; `key` is its canonical key.
    BookConfirmed { key: String },
    /// Persisting the identification failed; the match stays on screen.
    SaveFailed,
}

/// Tunables for a scan session.
#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// Upper bound on one search + dedup round trip; expiry resolves to
    /// [`ScanState::MatchNotFound`].
    pub lookup_timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(10),
        }
    }
}
