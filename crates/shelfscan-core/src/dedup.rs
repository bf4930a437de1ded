//! New-vs-already-cataloged classification for identified books

use crate::domain::BookSearchResult;
use crate::error::{LookupError, StoreError};
use crate::store::CatalogStore;

/// Outcome of classifying a search result against the user's library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BookLookup {
    /// Not in the library yet.
    Found(BookSearchResult),
    /// A book with the same canonical key is already cataloged.
    AlreadySaved(BookSearchResult),
}

/// Classify a search result by canonical-key presence in the user's library.
///
/// The classification depends only on whether the store holds the key, not
/// on the search content. Store misses are the expected "new book" path;
/// any other store failure propagates as a lookup failure.
pub async fn classify(
    store: &dyn CatalogStore,
    result: BookSearchResult,
    user_id: &str,
) -> Result<BookLookup, LookupError> {
    let key = result.canonical_key();
    match store.user_book(&key, user_id).await {
        Ok(_) => Ok(BookLookup::AlreadySaved(result)),
        Err(StoreError::NotFound) => Ok(BookLookup::Found(result)),
        Err(e) => {
            tracing::error!(%key, error = %e, "dedup lookup failed");
            Err(e.into())
        }
    }
}
