//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Roles available for route gating.
///
/// Roles are totally ordered by privilege level: Admin > User > Guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Registered but not yet allowed to take part (e.g. unconfirmed).
    Guest,
    /// Regular participant.
    User,
    /// Contest administrator.
    Admin,
}

impl UserRole {
    /// Every role, lowest privilege first.
    pub const ALL: [UserRole; 3] = [Self::Guest, Self::User, Self::Admin];

    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Guest => 0,
            Self::User => 1,
            Self::Admin => 2,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &UserRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl PartialOrd for UserRole {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UserRole {
    fn cmp(&self, other: &Self) -> Ordering {
        self.privilege_level().cmp(&other.privilege_level())
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = tadoku_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "guest" => Ok(Self::Guest),
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(tadoku_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: guest, user, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_ordering() {
        assert!(UserRole::Admin.has_at_least(&UserRole::Guest));
        assert!(UserRole::Admin.has_at_least(&UserRole::Admin));
        assert!(UserRole::User.has_at_least(&UserRole::Guest));
        assert!(!UserRole::Guest.has_at_least(&UserRole::User));
        assert!(!UserRole::User.has_at_least(&UserRole::Admin));
    }

    #[test]
    fn test_total_order_matches_all() {
        let mut shuffled = [UserRole::Admin, UserRole::Guest, UserRole::User];
        shuffled.sort();
        assert_eq!(shuffled, UserRole::ALL);
        assert_eq!(UserRole::User.max(UserRole::Admin), UserRole::Admin);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("USER".parse::<UserRole>().unwrap(), UserRole::User);
        assert!("moderator".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&UserRole::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
        let role: UserRole = serde_json::from_str("\"guest\"").unwrap();
        assert_eq!(role, UserRole::Guest);
    }
}
