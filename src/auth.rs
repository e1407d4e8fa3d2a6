//! Credential, token, and profile types shared by the strategy and the OAuth client.

pub mod credential;
pub mod profile;
pub mod secret;
pub mod token;

pub use credential::*;
pub use profile::*;
pub use secret::*;
pub use token::*;
