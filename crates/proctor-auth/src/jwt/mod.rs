//! Signed token encoding and verification.

pub mod claims;
pub mod codec;
pub mod decoder;
pub mod encoder;

pub use claims::{Claims, TokenKind};
pub use codec::TokenCodec;
pub use decoder::JwtDecoder;
pub use encoder::{IssuedToken, JwtEncoder};
