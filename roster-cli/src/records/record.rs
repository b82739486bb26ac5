//! The validated user record

use serde::{Deserialize, Serialize};

/// A user row that passed validation and is ready to persist
///
/// `id` is kept as text: numeric cells are rendered the way the sheet
/// displays them and never checked numerically. `email` is only required
/// to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl Record {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}
