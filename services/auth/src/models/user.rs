//! User model and related functionality

use serde::{Deserialize, Serialize};

/// The signed-in employee as reported by `GET /auth/user`
///
/// The backend answers with empty strings rather than an error when nobody
/// is signed in, so every field defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl User {
    /// Whether the backend actually identified someone
    pub fn has_identity(&self) -> bool {
        !self.email.trim().is_empty()
    }

    /// Avatar initials: first letters of the first and last names
    pub fn initials(&self) -> String {
        let parts: Vec<&str> = self.name.split_whitespace().collect();

        let letters: Vec<char> = match parts.as_slice() {
            [] => return "U".to_string(),
            [only] => only.chars().take(1).collect(),
            [first, .., last] => first.chars().take(1).chain(last.chars().take(1)).collect(),
        };

        letters.into_iter().flat_map(char::to_uppercase).collect()
    }

    /// Picture URL, ignoring the empty string the backend sends for "none"
    pub fn picture_url(&self) -> Option<&str> {
        self.picture.as_deref().filter(|url| !url.is_empty())
    }
}
