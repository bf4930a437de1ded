//! Persisted, user-owned catalog entries

use serde::{Deserialize, Serialize};

/// A book in a user's library.
///
/// Created when the user confirms and saves a staged draft; owned by the
/// external document store thereafter.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserBook {
    pub key: String,
    pub user_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub languages: Vec<String>,
    pub publisher: String,
    pub subjects: Vec<String>,
}

/// A subject label scoped to one user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSubject {
    pub name: String,
    pub user_id: String,
}

impl UserSubject {
    pub fn new(name: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            user_id: user_id.into(),
        }
    }
}
