//! Document store boundary
//!
//! The backend owns all persisted records; this crate only speaks to it
//! through this trait. Implementations live with the hosting application
//! (and in-memory fakes live with the tests).

use async_trait::async_trait;

use crate::domain::{BookSearchResult, UserBook, UserSubject};
use crate::error::StoreError;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch a user's book by canonical key. `StoreError::NotFound` is the
    /// expected miss that classifies a scan as a new record.
    async fn user_book(&self, key: &str, user_id: &str) -> Result<UserBook, StoreError>;

    /// Persist a confirmed identification under its canonical key.
    /// Returns the stored document id.
    async fn save_identified(&self, result: &BookSearchResult) -> Result<String, StoreError>;

    /// Add a book to the user's library. Returns the stored document id.
    async fn save_user_book(&self, book: &UserBook) -> Result<String, StoreError>;

    /// All subjects the user has created.
    async fn user_subjects(&self, user_id: &str) -> Result<Vec<UserSubject>, StoreError>;

    /// Persist a new subject. Returns the stored document id.
    async fn save_subject(&self, subject: &UserSubject) -> Result<String, StoreError>;
}
