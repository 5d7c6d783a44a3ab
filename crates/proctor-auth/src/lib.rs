//! # proctor-auth
//!
//! Credential handling for Proctor.
//!
//! ## Modules
//!
//! - `jwt` — signed token codec (issue / verify, no expiry policy)
//! - `lifecycle` — access/refresh issuance and single-use refresh rotation
//!   backed by a key-value ledger
//! - `password` — Argon2id password hashing and policy enforcement
//! - `error` — the credential failure taxonomy

pub mod error;
pub mod jwt;
pub mod lifecycle;
pub mod password;

pub use error::CredentialError;
pub use jwt::{Claims, TokenCodec, TokenKind};
pub use lifecycle::{CredentialManager, RefreshLedger, TokenPair};
pub use password::{PasswordHasher, PasswordValidator};
