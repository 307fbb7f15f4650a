//! Claims carried inside session tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use tadoku_entity::user::{Identity, UserRole};

/// What the caller asks to be embedded in a session token.
///
/// Signed but readable by anyone; never put secrets in here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// The authenticated identity, `None` for an anonymous session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
    /// Open-ended extension data.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl SessionClaims {
    /// Claims without an identity.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Claims for an authenticated identity.
    pub fn for_identity(identity: Identity) -> Self {
        Self {
            user: Some(identity),
            data: Map::new(),
        }
    }

    /// Adds an extension entry.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Role of the embedded identity, if any.
    pub fn role(&self) -> Option<UserRole> {
        self.user.map(|identity| identity.role)
    }
}

/// The full signed claim set: session payload plus validity window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated identity, `None` for an anonymous session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
    /// Open-ended extension data.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Combines a session payload with its validity window.
    pub fn new(session: SessionClaims, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            user: session.user,
            data: session.data,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the session payload without the validity window.
    pub fn session(&self) -> SessionClaims {
        SessionClaims {
            user: self.user,
            data: self.data.clone(),
        }
    }

    /// Consumes the claim set and returns the session payload.
    pub fn into_session(self) -> SessionClaims {
        SessionClaims {
            user: self.user,
            data: self.data,
        }
    }

    /// Returns the issue time as a `DateTime<Utc>`.
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Checks whether the token has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at()
    }
}
