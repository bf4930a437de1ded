//! Per-user subject catalog feeding the book input form

use crate::domain::UserSubject;

/// One subject entry: pure selectable state, no rendering concerns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectChip {
    pub display: String,
    /// Whether the subject will be saved with the book. Independent of
    /// current visibility.
    pub applied: bool,
    /// Whether the entry passes the current filter text.
    pub visible: bool,
}

/// The user's full subject set, loaded once per input session, with a
/// filtered/applied projection over it.
#[derive(Debug, Default)]
pub struct SubjectCatalog {
    entries: Vec<SubjectChip>,
}

impl SubjectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_subjects(subjects: Vec<UserSubject>) -> Self {
        Self {
            entries: subjects
                .into_iter()
                .map(|subject| SubjectChip {
                    display: subject.name,
                    applied: false,
                    visible: true,
                })
                .collect(),
        }
    }

    /// All entries, visible or not.
    pub fn entries(&self) -> &[SubjectChip] {
        &self.entries
    }

    /// The currently visible projection, in catalog order.
    pub fn visible(&self) -> impl Iterator<Item = &SubjectChip> {
        self.entries.iter().filter(|chip| chip.visible)
    }

    /// Toggle the applied flag of the `index`-th *visible* entry.
    ///
    /// Indices are computed over the visible projection at call time, so a
    /// filter change between calls cannot redirect a toggle to a hidden
    /// entry. Out-of-range indices are a no-op.
    pub fn toggle_visible(&mut self, index: usize) {
        if let Some(chip) = self
            .entries
            .iter_mut()
            .filter(|chip| chip.visible)
            .nth(index)
        {
            chip.applied = !chip.applied;
        }
    }

    /// Recompute visibility as a case-insensitive substring match on the
    /// display text. Applied flags are untouched.
    pub fn set_filter(&mut self, query: &str) {
        let query = query.to_lowercase();
        for chip in &mut self.entries {
            chip.visible = chip.display.to_lowercase().contains(&query);
        }
    }

    pub fn clear_filter(&mut self) {
        self.set_filter("");
    }

    /// Mark a case-insensitively matching entry as applied.
    ///
    /// Returns true when such an entry exists, in which case no new entry
    /// (and no store write) is needed.
    pub fn apply_existing(&mut self, name: &str) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|chip| chip.display.eq_ignore_ascii_case(name))
        {
            Some(chip) => {
                chip.applied = true;
                true
            }
            None => false,
        }
    }

    /// Append a freshly persisted subject, applied and visible.
    pub fn append_applied(&mut self, name: impl Into<String>) {
        self.entries.push(SubjectChip {
            display: name.into(),
            applied: true,
            visible: true,
        });
    }

    /// Display texts of every applied entry, independent of filter state.
    pub fn applied(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|chip| chip.applied)
            .map(|chip| chip.display.clone())
            .collect()
    }
}
