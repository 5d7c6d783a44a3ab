//! Credential lifecycle: issuance, single-use refresh rotation, and
//! access-token authentication.

pub mod ledger;
pub mod manager;

pub use ledger::RefreshLedger;
pub use manager::{CredentialManager, TokenPair};
