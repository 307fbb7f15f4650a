//! Session token encoding, decoding, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod error;

pub use claims::{Claims, SessionClaims};
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
pub use error::TokenError;
