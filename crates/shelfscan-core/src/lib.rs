//! shelfscan-core: book identification and cataloging pipeline
//!
//! This library provides the engine behind a shelf-scanning cataloger:
//! - ISBN extraction from recognized text frames
//! - Open Library identifier lookup and field mapping
//! - Dedup against the user's own library
//! - The scan session state machine (one lookup in flight, cancellable)
//! - The book input staging form (validation, chips, subjects)
//! - One-shot event queues bridging async outcomes to the caller
//!
//! Camera/OCR, rendering, and the document store backend are external
//! collaborators, reached only through the traits in [`sources`] and
//! [`store`].

pub mod dedup;
pub mod domain;
pub mod error;
pub mod events;
pub mod http;
pub mod identifiers;
pub mod input;
pub mod scan;
pub mod sources;
pub mod store;
pub mod subjects;

// Re-export main types for convenience
pub use dedup::BookLookup;
pub use domain::{BookSearchResult, DetectedTextFrame, UserBook, UserSubject};
pub use error::{LookupError, StoreError};
pub use events::EventQueue;
pub use input::{BookDraft, BookInputSession, Chip, InputEvent};
pub use scan::{ScanConfig, ScanEvent, ScanSession, ScanState};
pub use sources::{OpenLibrarySource, SearchClient};
pub use store::CatalogStore;
pub use subjects::{SubjectCatalog, SubjectChip};
