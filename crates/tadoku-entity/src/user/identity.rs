//! The minimal authenticated identity embedded in session tokens.

use serde::{Deserialize, Serialize};

use super::model::User;
use super::role::UserRole;

/// Who is acting: a user id plus the role held when the token was issued.
///
/// Token contents are signed but readable by anyone, so nothing sensitive
/// belongs here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User id.
    pub id: u64,
    /// Role at issuance time.
    pub role: UserRole,
}

impl Identity {
    /// Creates a new identity.
    pub fn new(id: u64, role: UserRole) -> Self {
        Self { id, role }
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.role)
    }
}
