//! In-memory user store using a Tokio mutex for single-node deployments.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use tadoku_core::error::AppError;
use tadoku_core::traits::Clock;
use tadoku_entity::user::{User, UserRole};

use super::store::{NewUser, UserStore};

/// Internal state for the memory-based user store.
#[derive(Debug, Default)]
struct InnerState {
    /// Users keyed by id.
    users: BTreeMap<u64, User>,
    /// Last id handed out.
    last_id: u64,
}

/// In-memory user store.
///
/// Suitable for development and tests only; contents are lost on restart.
#[derive(Debug, Clone)]
pub struct MemoryUserStore {
    /// Protected inner state.
    state: Arc<Mutex<InnerState>>,
    /// Source of `created_at`/`updated_at`.
    clock: Option<Arc<dyn Clock>>,
}

impl MemoryUserStore {
    /// Creates an empty store stamping records with the system time.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(InnerState::default())),
            clock: None,
        }
    }

    /// Creates an empty store stamping records with `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(InnerState::default())),
            clock: Some(clock),
        }
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.state.lock().await.users.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.users.is_empty()
    }

    fn now(&self) -> chrono::DateTime<Utc> {
        self.clock.as_ref().map_or_else(Utc::now, |clock| clock.now())
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| u.has_email(email)).cloned())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>, AppError> {
        let state = self.state.lock().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let now = self.now();
        let mut state = self.state.lock().await;

        if state.users.values().any(|u| u.has_email(&new_user.email)) {
            return Err(AppError::conflict("Email is already registered"));
        }

        state.last_id += 1;
        let user = User {
            id: state.last_id,
            email: new_user.email.trim().to_string(),
            display_name: new_user.display_name,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn update_password(&self, id: u64, password_hash: String) -> Result<(), AppError> {
        let now = self.now();
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

        user.password_hash = password_hash;
        user.updated_at = now;
        Ok(())
    }

    async fn update_role(&self, id: u64, role: UserRole) -> Result<(), AppError> {
        let now = self.now();
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

        user.role = role;
        user.updated_at = now;
        Ok(())
    }
}
