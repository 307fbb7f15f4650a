//! Password hashing and policy enforcement.

pub mod hasher;
pub mod validator;

pub use hasher::{HashingError, PasswordHasher};
pub use validator::PasswordValidator;
