//! Session issuance: login and re-issue.

pub mod manager;

pub use manager::{LoginResult, SessionManager};
