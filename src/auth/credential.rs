//! Precomputed HTTP Basic credential for direct token endpoint calls.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, error::ConfigError};

/// `base64(client_id:client_secret)` computed once when the strategy is built.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredential(String);
impl BasicCredential {
	/// Encodes the credential pair, rejecting empty halves.
	pub fn new(client_id: &str, client_secret: &str) -> Result<Self, ConfigError> {
		if client_id.is_empty() {
			return Err(ConfigError::MissingClientId);
		}
		if client_secret.is_empty() {
			return Err(ConfigError::MissingClientSecret);
		}

		Ok(Self(STANDARD.encode(format!("{client_id}:{client_secret}"))))
	}

	/// Returns the encoded credential without the scheme prefix.
	pub fn encoded(&self) -> &str {
		&self.0
	}

	/// Returns the full `Authorization` header value (`Basic <credential>`).
	pub fn header_value(&self) -> String {
		format!("Basic {}", self.0)
	}
}
impl Debug for BasicCredential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("BasicCredential").field(&"<redacted>").finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn encodes_client_pair() {
		let credential = BasicCredential::new("123-456-789", "shhh-its-a-secret")
			.expect("Credential should build for non-empty inputs.");

		assert_eq!(credential.encoded(), STANDARD.encode("123-456-789:shhh-its-a-secret"));
		assert_eq!(credential.encoded(), "MTIzLTQ1Ni03ODk6c2hoaC1pdHMtYS1zZWNyZXQ=");
		assert_eq!(
			credential.header_value(),
			"Basic MTIzLTQ1Ni03ODk6c2hoaC1pdHMtYS1zZWNyZXQ=".to_owned()
		);
	}

	#[test]
	fn keeps_colons_inside_the_secret() {
		let credential =
			BasicCredential::new("id", "a:b").expect("Credential should build with colons.");
		let decoded = STANDARD.decode(credential.encoded()).expect("Credential should decode.");

		assert_eq!(decoded, b"id:a:b");
	}

	#[test]
	fn rejects_empty_halves() {
		assert!(matches!(BasicCredential::new("", "secret"), Err(ConfigError::MissingClientId)));
		assert!(matches!(BasicCredential::new("id", ""), Err(ConfigError::MissingClientSecret)));
	}

	#[test]
	fn debug_redacts() {
		let credential = BasicCredential::new("id", "secret").expect("Credential should build.");

		assert_eq!(format!("{credential:?}"), "BasicCredential(\"<redacted>\")");
	}
}
