//! Bibliographic search source plugins

mod openlibrary;

pub use openlibrary::OpenLibrarySource;

use async_trait::async_trait;

use crate::domain::BookSearchResult;
use crate::error::LookupError;
use crate::http::HttpError;

/// Identifier search against an external bibliographic service.
///
/// Injected into the scan session so tests can drive the state machine
/// without a network.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Look up the first matching record for an ISBN.
    async fn search_by_isbn(&self, isbn: &str) -> Result<BookSearchResult, LookupError>;
}

impl From<HttpError> for LookupError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::ParseError { message } => LookupError::Malformed(message),
            other => LookupError::Transient(other.to_string()),
        }
    }
}
