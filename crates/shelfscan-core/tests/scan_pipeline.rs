//! End-to-end pipeline tests: frame intake through library persistence,
//! with in-memory collaborator fakes standing in for Open Library and the
//! document store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use shelfscan_core::{
    BookInputSession, BookSearchResult, CatalogStore, DetectedTextFrame, InputEvent, LookupError,
    ScanConfig, ScanEvent, ScanSession, ScanState, SearchClient, StoreError, UserBook,
    UserSubject,
};

const NEUROMANCER_ISBN: &str = "9780441569595";

fn neuromancer() -> BookSearchResult {
    BookSearchResult {
        title: "Neuromancer".to_string(),
        authors: vec!["William Gibson".to_string()],
        languages: vec!["eng".to_string()],
        publishers: vec!["Ace Books".to_string(), "Gollancz".to_string()],
        isbns: vec![NEUROMANCER_ISBN.to_string()],
        subjects: vec!["Cyberpunk".to_string()],
        published_years: vec![1984],
        source_key: "/works/OL27482W".to_string(),
        sort_key: "813.54".to_string(),
    }
}

fn isbn_frame() -> DetectedTextFrame {
    DetectedTextFrame::new(vec![format!("ISBN-13 {NEUROMANCER_ISBN} other text")])
}

/// Search fake returning one fixed record for any ISBN.
struct StaticSearch {
    result: BookSearchResult,
}

#[async_trait]
impl SearchClient for StaticSearch {
    async fn search_by_isbn(&self, _isbn: &str) -> Result<BookSearchResult, LookupError> {
        Ok(self.result.clone())
    }
}

/// In-memory document store covering every collaborator operation.
#[derive(Default)]
struct InMemoryStore {
    books: Mutex<HashMap<(String, String), UserBook>>,
    identified: Mutex<HashMap<String, BookSearchResult>>,
    subjects: Mutex<Vec<UserSubject>>,
    fail_writes: AtomicBool,
    fail_subject_reads: AtomicBool,
}

impl InMemoryStore {
    fn saved_books(&self) -> Vec<UserBook> {
        self.books.lock().unwrap().values().cloned().collect()
    }

    fn identified_keys(&self) -> Vec<String> {
        self.identified.lock().unwrap().keys().cloned().collect()
    }

    fn subject_names(&self) -> Vec<String> {
        self.subjects
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.name.clone())
            .collect()
    }

    fn unavailable() -> StoreError {
        StoreError::Unavailable("store offline".to_string())
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn user_book(&self, key: &str, user_id: &str) -> Result<UserBook, StoreError> {
        self.books
            .lock()
            .unwrap()
            .get(&(key.to_string(), user_id.to_string()))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn save_identified(&self, result: &BookSearchResult) -> Result<String, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        let key = result.canonical_key();
        self.identified
            .lock()
            .unwrap()
            .insert(key.clone(), result.clone());
        Ok(key)
    }

    async fn save_user_book(&self, book: &UserBook) -> Result<String, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.books
            .lock()
            .unwrap()
            .insert((book.key.clone(), book.user_id.clone()), book.clone());
        Ok(book.key.clone())
    }

    async fn user_subjects(&self, user_id: &str) -> Result<Vec<UserSubject>, StoreError> {
        if self.fail_subject_reads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(self
            .subjects
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn save_subject(&self, subject: &UserSubject) -> Result<String, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.subjects.lock().unwrap().push(subject.clone());
        Ok(subject.name.clone())
    }
}

async fn wait_past_loading(session: &ScanSession) -> ScanState {
    let mut rx = session.subscribe();
    loop {
        let current = rx.borrow_and_update().clone();
        if !matches!(current, ScanState::Scanning | ScanState::Loading) {
            return current;
        }
        rx.changed().await.expect("session dropped");
    }
}

#[tokio::test]
async fn frame_to_saved_library_book() {
    let store = Arc::new(InMemoryStore::default());
    let search = Arc::new(StaticSearch {
        result: neuromancer(),
    });

    // Scan: frame -> extraction -> lookup -> match.
    let scan = ScanSession::new(
        search,
        Arc::clone(&store) as Arc<dyn CatalogStore>,
        "user-1",
        ScanConfig::default(),
    );
    scan.frame_detected(&isbn_frame());
    assert_eq!(
        wait_past_loading(&scan).await,
        ScanState::MatchFound(neuromancer())
    );

    // Confirm: persists the identification, queues the one-shot event.
    scan.confirm_match().await;
    assert_eq!(store.identified_keys(), vec!["/OL27482W".to_string()]);
    assert_eq!(
        scan.next_event(),
        Some(ScanEvent::BookConfirmed {
            key: "/OL27482W".to_string()
        })
    );
    scan.acknowledge_event();

    // Stage and edit the draft, then submit.
    let mut input = BookInputSession::for_search_result(
        Arc::clone(&store) as Arc<dyn CatalogStore>,
        "user-1",
        &neuromancer(),
    )
    .await;
    input.draft_mut().toggle_language(0);
    input.draft_mut().toggle_publisher(1);
    input.add_subject("Fiction").await;
    input.submit().await;

    assert_eq!(input.events().peek(), Some(InputEvent::Saved {
        title: "Neuromancer".to_string()
    }));

    let books = store.saved_books();
    assert_eq!(books.len(), 1);
    let book = &books[0];
    assert_eq!(book.key, "/OL27482W");
    assert_eq!(book.user_id, "user-1");
    assert_eq!(book.languages, vec!["English"]);
    assert_eq!(book.publisher, "Gollancz");
    assert_eq!(book.subjects, vec!["Fiction"]);
}

#[tokio::test]
async fn rescanning_a_saved_book_reports_already_saved() {
    let store = Arc::new(InMemoryStore::default());
    store
        .save_user_book(&UserBook {
            key: "/OL27482W".to_string(),
            user_id: "user-1".to_string(),
            title: "Neuromancer".to_string(),
            authors: vec!["William Gibson".to_string()],
            languages: vec!["English".to_string()],
            publisher: "Ace Books".to_string(),
            subjects: vec![],
        })
        .await
        .unwrap();

    let scan = ScanSession::new(
        Arc::new(StaticSearch {
            result: neuromancer(),
        }),
        Arc::clone(&store) as Arc<dyn CatalogStore>,
        "user-1",
        ScanConfig::default(),
    );
    scan.frame_detected(&isbn_frame());

    assert_eq!(
        wait_past_loading(&scan).await,
        ScanState::MatchAlreadySaved(neuromancer())
    );
}

#[tokio::test]
async fn dedup_is_scoped_to_the_scanning_user() {
    let store = Arc::new(InMemoryStore::default());
    store
        .save_user_book(&UserBook {
            key: "/OL27482W".to_string(),
            user_id: "someone-else".to_string(),
            title: "Neuromancer".to_string(),
            authors: vec!["William Gibson".to_string()],
            languages: vec!["English".to_string()],
            publisher: "Ace Books".to_string(),
            subjects: vec![],
        })
        .await
        .unwrap();

    let scan = ScanSession::new(
        Arc::new(StaticSearch {
            result: neuromancer(),
        }),
        Arc::clone(&store) as Arc<dyn CatalogStore>,
        "user-1",
        ScanConfig::default(),
    );
    scan.frame_detected(&isbn_frame());

    assert_eq!(
        wait_past_loading(&scan).await,
        ScanState::MatchFound(neuromancer())
    );
}

#[tokio::test]
async fn invalid_submit_persists_nothing() {
    let store = Arc::new(InMemoryStore::default());
    let mut result = neuromancer();
    result.title = String::new();
    result.authors = vec![String::new()];

    let mut input = BookInputSession::for_search_result(
        Arc::clone(&store) as Arc<dyn CatalogStore>,
        "user-1",
        &result,
    )
    .await;
    input.submit().await;

    let draft = input.draft();
    assert!(draft.title_error);
    assert!(draft.authors_error);
    assert!(draft.language_error);
    assert!(draft.publisher_error);
    assert!(store.saved_books().is_empty(), "no partial persistence");
    assert!(input.events().is_empty());
}

#[tokio::test]
async fn save_failure_queues_error_and_stays_editable() {
    let store = Arc::new(InMemoryStore::default());
    let mut input = BookInputSession::for_search_result(
        Arc::clone(&store) as Arc<dyn CatalogStore>,
        "user-1",
        &neuromancer(),
    )
    .await;
    input.draft_mut().toggle_language(0);
    input.draft_mut().toggle_publisher(0);

    store.fail_writes.store(true, Ordering::SeqCst);
    input.submit().await;

    assert_eq!(input.events().peek(), Some(InputEvent::Error));

    // The session recovers once the store does.
    input.events_mut().acknowledge();
    store.fail_writes.store(false, Ordering::SeqCst);
    input.submit().await;
    assert_eq!(store.saved_books().len(), 1);
}

#[tokio::test]
async fn added_subject_is_persisted_applied_and_filterable() {
    let store = Arc::new(InMemoryStore::default());
    let mut input = BookInputSession::for_search_result(
        Arc::clone(&store) as Arc<dyn CatalogStore>,
        "user-1",
        &neuromancer(),
    )
    .await;

    input.add_subject("  Fiction  ").await;
    input.subjects_mut().set_filter("fic");

    let chips: Vec<_> = input.subjects().visible().collect();
    assert_eq!(chips.len(), 1);
    assert_eq!(chips[0].display, "Fiction");
    assert!(chips[0].applied);
    assert_eq!(store.subject_names(), vec!["Fiction"]);
}

#[tokio::test]
async fn duplicate_subject_reuses_existing_entry() {
    let store = Arc::new(InMemoryStore::default());
    store
        .save_subject(&UserSubject::new("Fiction", "user-1"))
        .await
        .unwrap();

    let mut input = BookInputSession::for_search_result(
        Arc::clone(&store) as Arc<dyn CatalogStore>,
        "user-1",
        &neuromancer(),
    )
    .await;
    input.add_subject("fiction").await;

    assert_eq!(store.subject_names(), vec!["Fiction"], "no duplicate write");
    assert_eq!(input.subjects().applied(), vec!["Fiction"]);
}

#[tokio::test]
async fn subject_save_failure_queues_error() {
    let store = Arc::new(InMemoryStore::default());
    let mut input = BookInputSession::for_search_result(
        Arc::clone(&store) as Arc<dyn CatalogStore>,
        "user-1",
        &neuromancer(),
    )
    .await;

    store.fail_writes.store(true, Ordering::SeqCst);
    input.add_subject("Fiction").await;

    assert_eq!(input.events().peek(), Some(InputEvent::Error));
    assert!(input.subjects().applied().is_empty());
}

#[tokio::test]
async fn subject_load_failure_degrades_to_empty_catalog() {
    let store = Arc::new(InMemoryStore::default());
    store.fail_subject_reads.store(true, Ordering::SeqCst);

    let mut input = BookInputSession::for_search_result(
        Arc::clone(&store) as Arc<dyn CatalogStore>,
        "user-1",
        &neuromancer(),
    )
    .await;

    assert!(input.subjects().entries().is_empty());

    // The form itself is still usable.
    store.fail_subject_reads.store(false, Ordering::SeqCst);
    input.draft_mut().toggle_language(0);
    input.draft_mut().toggle_publisher(0);
    input.submit().await;
    assert_eq!(store.saved_books().len(), 1);
}

#[tokio::test]
async fn edit_session_preselects_stored_values() {
    let store = Arc::new(InMemoryStore::default());
    store
        .save_subject(&UserSubject::new("Cyberpunk", "user-1"))
        .await
        .unwrap();

    let book = UserBook {
        key: "/OL27482W".to_string(),
        user_id: "user-1".to_string(),
        title: "Neuromancer".to_string(),
        authors: vec!["William Gibson".to_string()],
        languages: vec!["English".to_string()],
        publisher: "Gollancz".to_string(),
        subjects: vec!["Cyberpunk".to_string(), "Classics".to_string()],
    };

    let mut input = BookInputSession::for_user_book(
        Arc::clone(&store) as Arc<dyn CatalogStore>,
        "user-1",
        &book,
    )
    .await;

    let draft = input.draft();
    assert!(draft.languages.iter().all(|c| c.selected));
    assert_eq!(draft.publishers.len(), 1);
    assert!(draft.publishers[0].selected);

    let mut applied = input.subjects().applied();
    applied.sort();
    assert_eq!(applied, vec!["Classics", "Cyberpunk"]);

    // Resubmitting keeps the record valid without touching chips.
    input.submit().await;
    assert_eq!(
        input.events().peek(),
        Some(InputEvent::Saved {
            title: "Neuromancer".to_string()
        })
    );
}
