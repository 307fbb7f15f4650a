//! # tadoku-auth
//!
//! Authentication and authorization primitives for the Tadoku contest API.
//!
//! ## Modules
//!
//! - `password`: Argon2id credential hashing and password policy
//! - `jwt`: signed, time-bounded session tokens
//! - `rbac`: minimum-role access policy
//! - `user`: user store abstraction and account operations
//! - `session`: login and session re-issue flows

pub mod jwt;
pub mod password;
pub mod rbac;
pub mod session;
pub mod user;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, SessionClaims, TokenError};
pub use password::{HashingError, PasswordHasher, PasswordValidator};
pub use rbac::AccessPolicy;
pub use session::SessionManager;
pub use user::{MemoryUserStore, NewUser, UserService, UserStore};
