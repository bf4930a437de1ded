//! Mutable draft form seeded from a resolved record

use crate::domain::{display_language, BookSearchResult, UserBook};

/// A selectable value in the draft: pure state, no rendering concerns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chip {
    pub display: String,
    pub selected: bool,
}

impl Chip {
    fn unselected(display: String) -> Self {
        Self {
            display,
            selected: false,
        }
    }

    fn selected(display: String) -> Self {
        Self {
            display,
            selected: true,
        }
    }
}

/// The editable staging form for one input session.
///
/// Seeded from a search result (new book) or an existing user book (edit
/// flow); discarded on submit or abandonment. Field invariants: at least
/// one author field always exists, and at most one publisher chip is
/// selected.
#[derive(Clone, Debug)]
pub struct BookDraft {
    key: String,
    pub title: String,
    pub title_error: bool,
    pub authors: Vec<String>,
    pub authors_error: bool,
    pub languages: Vec<Chip>,
    pub language_error: bool,
    pub publishers: Vec<Chip>,
    pub publisher_error: bool,
}

impl BookDraft {
    /// Seed a draft from a resolved search result.
    ///
    /// One chip per distinct language (display-resolved where the code is
    /// known) and per distinct publisher, all initially unselected so the
    /// user makes an explicit choice.
    pub fn from_search_result(result: &BookSearchResult) -> Self {
        let languages = distinct(
            result
                .languages
                .iter()
                .map(|code| display_language(code).map_or_else(|| code.clone(), str::to_string)),
        );
        let publishers = distinct(result.publishers.iter().cloned());

        Self {
            key: result.canonical_key(),
            title: result.title.clone(),
            title_error: false,
            authors: at_least_one(result.authors.clone()),
            authors_error: false,
            languages: languages.into_iter().map(Chip::unselected).collect(),
            language_error: false,
            publishers: publishers.into_iter().map(Chip::unselected).collect(),
            publisher_error: false,
        }
    }

    /// Seed a draft from an already-cataloged book (edit flow); its stored
    /// languages and publisher come back pre-selected.
    pub fn from_user_book(book: &UserBook) -> Self {
        Self {
            key: book.key.clone(),
            title: book.title.clone(),
            title_error: false,
            authors: at_least_one(book.authors.clone()),
            authors_error: false,
            languages: distinct(book.languages.iter().cloned())
                .into_iter()
                .map(Chip::selected)
                .collect(),
            language_error: false,
            publishers: vec![Chip::selected(book.publisher.clone())],
            publisher_error: false,
        }
    }

    /// Canonical key the assembled book will be stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.title_error = false;
    }

    pub fn set_author(&mut self, index: usize, text: impl Into<String>) {
        if let Some(author) = self.authors.get_mut(index) {
            *author = text.into();
            self.authors_error = false;
        }
    }

    pub fn add_author(&mut self) {
        self.authors.push(String::new());
    }

    /// Remove an author field; keeping the last one is a no-op.
    pub fn remove_author(&mut self, index: usize) {
        if self.authors.len() == 1 || index >= self.authors.len() {
            return;
        }
        self.authors.remove(index);
        self.authors_error = false;
    }

    /// Flip one language chip independently of the others (multi-select).
    pub fn toggle_language(&mut self, index: usize) {
        if let Some(chip) = self.languages.get_mut(index) {
            chip.selected = !chip.selected;
            self.language_error = false;
        }
    }

    /// Select exactly this publisher chip, deselecting all others
    /// (single-select).
    pub fn toggle_publisher(&mut self, index: usize) {
        if index >= self.publishers.len() {
            return;
        }
        for (i, chip) in self.publishers.iter_mut().enumerate() {
            chip.selected = i == index;
        }
        self.publisher_error = false;
    }

    /// Validate the draft for submission.
    ///
    /// On failure, all failing error flags are set in one step and no
    /// partial state escapes. On success all flags are cleared.
    pub fn validate(&mut self) -> bool {
        let title_valid = !self.title.trim().is_empty();
        let authors_valid = self.authors.iter().all(|a| !a.trim().is_empty());
        let language_valid = self.languages.iter().any(|c| c.selected);
        let publisher_valid = self.publishers.iter().any(|c| c.selected);

        self.title_error = !title_valid;
        self.authors_error = !authors_valid;
        self.language_error = !language_valid;
        self.publisher_error = !publisher_valid;

        title_valid && authors_valid && language_valid && publisher_valid
    }

    /// Assemble the persisted shape from a validated draft.
    ///
    /// Returns `None` when no publisher is selected, which cannot happen
    /// after a successful [`validate`](Self::validate).
    pub fn assemble(&self, user_id: &str, subjects: Vec<String>) -> Option<UserBook> {
        let publisher = self
            .publishers
            .iter()
            .find(|chip| chip.selected)
            .map(|chip| chip.display.clone())?;

        Some(UserBook {
            key: self.key.clone(),
            user_id: user_id.to_string(),
            title: self.title.clone(),
            authors: self.authors.clone(),
            languages: self
                .languages
                .iter()
                .filter(|chip| chip.selected)
                .map(|chip| chip.display.clone())
                .collect(),
            publisher,
            subjects,
        })
    }
}

fn at_least_one(authors: Vec<String>) -> Vec<String> {
    if authors.is_empty() {
        vec![String::new()]
    } else {
        authors
    }
}

/// Keep first occurrences, preserving source order.
fn distinct<I: Iterator<Item = String>>(values: I) -> Vec<String> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
