//! Bibliographic search result from the Open Library lookup

use serde::{Deserialize, Serialize};

/// Namespace segment Open Library prefixes onto work keys. The document
/// store rejects "/" in identifiers, so it is stripped for the canonical key.
const WORKS_NAMESPACE: &str = "/works";

/// An immutable bibliographic record returned by one identifier lookup.
///
/// Ephemeral per lookup: the scan session holds it while a match is on
/// screen, and the input session seeds its draft from it. Only the derived
/// [`UserBook`](super::UserBook) is owned by the user's library.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookSearchResult {
    pub title: String,
    pub authors: Vec<String>,
    pub languages: Vec<String>,
    pub publishers: Vec<String>,
    pub isbns: Vec<String>,
    pub subjects: Vec<String>,
    pub published_years: Vec<i32>,
    /// Open Library work key, e.g. `/works/OL27482W`.
    pub source_key: String,
    /// Dewey decimal sort key, empty when the source omits it.
    pub sort_key: String,
}

impl BookSearchResult {
    /// Canonical key used for store documents and dedup lookups.
    ///
    /// Deterministic for a given `source_key`: the namespace segment is
    /// removed so the key matches the `UserBook.key` format.
    pub fn canonical_key(&self) -> String {
        self.source_key.replace(WORKS_NAMESPACE, "")
    }
}
