//! Error taxonomy for collaborator boundaries

use thiserror::Error;

/// Failure of one identifier lookup (search + dedup).
///
/// Every variant resolves to the `MatchNotFound` scan state; none of them
/// escapes a session as a panic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Expected miss: the search service has no record for the identifier.
    #[error("no matching record")]
    NotFound,

    /// Network or store failure; retrying the scan may succeed.
    #[error("lookup failed: {0}")]
    Transient(String),

    /// The collaborator answered with something we could not decode.
    /// Treated like a transient failure at the state-machine boundary.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Failure from the externally-owned document store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No document under the requested key.
    #[error("document not found")]
    NotFound,

    /// The store could not be reached or refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored document failed to decode.
    #[error("malformed document: {0}")]
    Malformed(String),
}

impl From<StoreError> for LookupError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => LookupError::NotFound,
            StoreError::Unavailable(message) => LookupError::Transient(message),
            StoreError::Malformed(message) => LookupError::Malformed(message),
        }
    }
}
