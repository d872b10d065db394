//! Credential model for the password grant plus the redacting secret wrapper.

pub mod credential;
pub mod secret;

pub use credential::*;
pub use secret::*;
