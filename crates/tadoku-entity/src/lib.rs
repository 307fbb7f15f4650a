//! # tadoku-entity
//!
//! Domain entities shared by the authentication layer and the HTTP API.

pub mod user;
