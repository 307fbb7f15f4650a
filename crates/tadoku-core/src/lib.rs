//! # tadoku-core
//!
//! Core crate for the Tadoku contest API. Contains configuration schemas,
//! the clock abstraction, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Tadoku crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
