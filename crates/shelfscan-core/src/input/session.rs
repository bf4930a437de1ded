//! One book-input session: draft + subject catalog + persistence

use std::sync::Arc;

use crate::domain::{BookSearchResult, UserBook, UserSubject};
use crate::events::EventQueue;
use crate::store::CatalogStore;
use crate::subjects::SubjectCatalog;

use super::BookDraft;

/// One-shot outcome notifications from the input session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// The book was added to the user's library.
    Saved { title: String },
    /// A persistence call failed; the session stays editable.
    Error,
}

/// An isolated input session, created when the user confirms a scan (or
/// opens a cataloged book for editing) and discarded afterwards.
pub struct BookInputSession {
    draft: BookDraft,
    subjects: SubjectCatalog,
    events: EventQueue<InputEvent>,
    store: Arc<dyn CatalogStore>,
    user_id: String,
}

impl BookInputSession {
    /// Start a session for a freshly identified book, loading the user's
    /// subject catalog. A subject-load failure degrades to an empty
    /// catalog; the form itself stays usable.
    pub async fn for_search_result(
        store: Arc<dyn CatalogStore>,
        user_id: impl Into<String>,
        result: &BookSearchResult,
    ) -> Self {
        let user_id = user_id.into();
        let subjects = load_subjects(store.as_ref(), &user_id).await;
        Self {
            draft: BookDraft::from_search_result(result),
            subjects,
            events: EventQueue::new(),
            store,
            user_id,
        }
    }

    /// Start an edit session for an already-cataloged book.
    pub async fn for_user_book(
        store: Arc<dyn CatalogStore>,
        user_id: impl Into<String>,
        book: &UserBook,
    ) -> Self {
        let user_id = user_id.into();
        let mut subjects = load_subjects(store.as_ref(), &user_id).await;
        for subject in &book.subjects {
            if !subjects.apply_existing(subject) {
                subjects.append_applied(subject.clone());
            }
        }
        Self {
            draft: BookDraft::from_user_book(book),
            subjects,
            events: EventQueue::new(),
            store,
            user_id,
        }
    }

    pub fn draft(&self) -> &BookDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut BookDraft {
        &mut self.draft
    }

    pub fn subjects(&self) -> &SubjectCatalog {
        &self.subjects
    }

    pub fn subjects_mut(&mut self) -> &mut SubjectCatalog {
        &mut self.subjects
    }

    pub fn events(&self) -> &EventQueue<InputEvent> {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventQueue<InputEvent> {
        &mut self.events
    }

    /// Add a subject by name: trimmed, re-using a case-insensitive match
    /// instead of duplicating, persisted before it appears in the catalog.
    pub async fn add_subject(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if self.subjects.apply_existing(name) {
            return;
        }

        let subject = UserSubject::new(name, self.user_id.clone());
        match self.store.save_subject(&subject).await {
            Ok(_) => self.subjects.append_applied(name),
            Err(e) => {
                tracing::error!(subject = name, error = %e, "failed to save subject");
                self.events.push(InputEvent::Error);
            }
        }
    }

    /// Validate and persist the draft.
    ///
    /// Validation failure only raises the field error flags; nothing is
    /// persisted. On success the assembled book (publisher from the
    /// selected chip, subjects from the applied set) goes to the store and
    /// the outcome lands in the event queue.
    pub async fn submit(&mut self) {
        if !self.draft.validate() {
            return;
        }
        let Some(book) = self.draft.assemble(&self.user_id, self.subjects.applied()) else {
            return;
        };

        match self.store.save_user_book(&book).await {
            Ok(_) => self.events.push(InputEvent::Saved { title: book.title }),
            Err(e) => {
                tracing::error!(key = %book.key, error = %e, "failed to save book");
                self.events.push(InputEvent::Error);
            }
        }
    }
}

async fn load_subjects(store: &dyn CatalogStore, user_id: &str) -> SubjectCatalog {
    match store.user_subjects(user_id).await {
        Ok(subjects) => SubjectCatalog::from_subjects(subjects),
        Err(e) => {
            tracing::error!(error = %e, "failed to load subjects");
            SubjectCatalog::new()
        }
    }
}
