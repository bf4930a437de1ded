//! The scan session state machine

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::AbortHandle;

use crate::dedup::{self, BookLookup};
use crate::domain::DetectedTextFrame;
use crate::error::LookupError;
use crate::events::EventQueue;
use crate::identifiers::extract_isbn;
use crate::sources::SearchClient;
use crate::store::CatalogStore;

use super::{ScanConfig, ScanEvent, ScanState};

/// One scanning session: consumes text frames, drives extraction, lookup,
/// and dedup, and exposes the outcome as a [`ScanState`].
///
/// State transitions are serialized through the single `watch` sender, so
/// frames delivered from concurrent recognition callbacks cannot
/// interleave transitions. Each session is isolated: constructed at
/// session start, disposed at session end, sharing nothing but the
/// externally-owned store.
pub struct ScanSession {
    inner: Arc<Inner>,
}

struct Inner {
    state: watch::Sender<ScanState>,
    events: Mutex<EventQueue<ScanEvent>>,
    lookup: Mutex<Option<AbortHandle>>,
    disposed: AtomicBool,
    search: Arc<dyn SearchClient>,
    store: Arc<dyn CatalogStore>,
    user_id: String,
    config: ScanConfig,
}

impl ScanSession {
    pub fn new(
        search: Arc<dyn SearchClient>,
        store: Arc<dyn CatalogStore>,
        user_id: impl Into<String>,
        config: ScanConfig,
    ) -> Self {
        let (state, _) = watch::channel(ScanState::Scanning);
        Self {
            inner: Arc::new(Inner {
                state,
                events: Mutex::new(EventQueue::new()),
                lookup: Mutex::new(None),
                disposed: AtomicBool::new(false),
                search,
                store,
                user_id: user_id.into(),
                config,
            }),
        }
    }

    /// The current scan state.
    pub fn state(&self) -> ScanState {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ScanState> {
        self.inner.state.subscribe()
    }

    /// Feed one recognition frame into the session.
    ///
    /// Frames arriving while the session is not `Scanning` are dropped,
    /// not queued; together with the atomic `Scanning -> Loading` flip
    /// this keeps at most one lookup in flight.
    pub fn frame_detected(&self, frame: &DetectedTextFrame) {
        if self.inner.disposed.load(Ordering::SeqCst) {
            return;
        }
        if *self.inner.state.borrow() != ScanState::Scanning {
            return;
        }
        let Some(isbn) = extract_isbn(frame) else {
            return;
        };

        // Concurrent frames race to this flip; exactly one wins.
        let started = self.inner.state.send_if_modified(|state| {
            if *state == ScanState::Scanning {
                *state = ScanState::Loading;
                true
            } else {
                false
            }
        });
        if !started {
            return;
        }

        tracing::debug!(%isbn, "dispatching identifier lookup");
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move { inner.run_lookup(isbn).await });
        *self.inner.lookup.lock().unwrap() = Some(task.abort_handle());
    }

    /// Persist the identified record. Valid only in `MatchFound`; the
    /// state stays `MatchFound` until [`resume_scanning`](Self::resume_scanning).
    pub async fn confirm_match(&self) {
        let ScanState::MatchFound(result) = self.state() else {
            return;
        };

        let key = result.canonical_key();
        match self.inner.store.save_identified(&result).await {
            Ok(_) => {
                self.inner
                    .events
                    .lock()
                    .unwrap()
                    .push(ScanEvent::BookConfirmed { key });
            }
            Err(e) => {
                tracing::error!(%key, error = %e, "failed to persist identification");
                self.inner.events.lock().unwrap().push(ScanEvent::SaveFailed);
            }
        }
    }

    /// Return to `Scanning` from any state, cancelling an in-flight
    /// lookup so a stale result cannot land on the fresh state.
    pub fn resume_scanning(&self) {
        self.abort_lookup();
        self.inner.state.send_replace(ScanState::Scanning);
    }

    /// The oldest unhandled scan event, if any.
    pub fn next_event(&self) -> Option<ScanEvent> {
        self.inner.events.lock().unwrap().peek()
    }

    /// Acknowledge (remove) the oldest scan event; no-op when none is
    /// pending.
    pub fn acknowledge_event(&self) {
        self.inner.events.lock().unwrap().acknowledge();
    }

    /// End the session. Cancels any in-flight lookup; no state update is
    /// emitted afterwards. Also runs on `Drop`.
    pub fn dispose(&self) {
        self.inner.disposed.store(true, Ordering::SeqCst);
        self.abort_lookup();
    }

    fn abort_lookup(&self) {
        if let Some(handle) = self.inner.lookup.lock().unwrap().take() {
            handle.abort();
        }
    }
}

impl Drop for ScanSession {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl Inner {
    async fn run_lookup(self: Arc<Self>, isbn: String) {
        let outcome = tokio::time::timeout(self.config.lookup_timeout, self.lookup(&isbn)).await;

        let next = match outcome {
            Ok(Ok(BookLookup::Found(result))) => ScanState::MatchFound(result),
            Ok(Ok(BookLookup::AlreadySaved(result))) => ScanState::MatchAlreadySaved(result),
            Ok(Err(LookupError::NotFound)) => {
                tracing::debug!(%isbn, "no record for identifier");
                ScanState::MatchNotFound
            }
            Ok(Err(e)) => {
                tracing::error!(%isbn, error = %e, "identifier lookup failed");
                ScanState::MatchNotFound
            }
            Err(_) => {
                tracing::error!(%isbn, "identifier lookup timed out");
                ScanState::MatchNotFound
            }
        };

        if self.disposed.load(Ordering::SeqCst) {
            return;
        }
        // Apply only if the session is still waiting on this lookup.
        self.state.send_if_modified(|state| {
            if *state == ScanState::Loading {
                *state = next;
                true
            } else {
                false
            }
        });
    }

    async fn lookup(&self, isbn: &str) -> Result<BookLookup, LookupError> {
        let result = self.search.search_by_isbn(isbn).await?;
        dedup::classify(self.store.as_ref(), result, &self.user_id).await
    }
}
