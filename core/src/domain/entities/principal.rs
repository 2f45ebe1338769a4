//! Authenticated identity carried inside tokens.

use serde::{Deserialize, Serialize};

/// Numeric user identifier plus display name.
///
/// The token core never looks users up; callers supply the principal when
/// tokens are issued and get it back from validated claims.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: u64,
    pub username: String,
}

impl Principal {
    pub fn new(user_id: u64, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}
