//! Domain models for the scanning and cataloging pipeline

mod frame;
mod languages;
mod search_result;
mod user_book;

pub use frame::DetectedTextFrame;
pub use languages::display_language;
pub use search_result::BookSearchResult;
pub use user_book::{UserBook, UserSubject};
