//! User storage abstraction and account operations.

pub mod memory;
pub mod service;
pub mod store;

pub use memory::MemoryUserStore;
pub use service::UserService;
pub use store::{NewUser, UserStore};
