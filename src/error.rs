//! Strategy-level error types shared across flows, the OAuth client, and configuration.

// self
use crate::_prelude::*;

/// Strategy-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical strategy error exposed by public APIs and signaled to the host.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Temporary upstream failure; retry with backoff.
	#[error(transparent)]
	Transient(#[from] TransientError),
	/// Transport failure (DNS, TCP, TLS) or an unexpected HTTP status.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Requested scopes exceed what was granted.
	#[error("Token lacks the required scopes: {reason}.")]
	InsufficientScope {
		/// Provider-supplied reason string.
		reason: String,
	},
	/// Provider rejected the grant (e.g., bad code or refresh token).
	#[error("Provider rejected the grant: {reason}.")]
	InvalidGrant {
		/// Provider-supplied reason string.
		reason: String,
	},
	/// Client authentication failed or credentials are malformed.
	#[error("Client authentication failed: {reason}.")]
	InvalidClient {
		/// Provider-supplied reason string.
		reason: String,
	},
	/// Authorization endpoint redirected back with an `error` parameter.
	#[error("Authorization request failed with `{code}`.")]
	Authorization {
		/// OAuth `error` code.
		code: String,
		/// Optional `error_description`.
		description: Option<String>,
		/// Optional `error_uri`.
		uri: Option<String>,
	},
	/// Profile endpoint could not be reached or answered with a failure status.
	#[error("Failed to fetch user profile.")]
	ProfileFetch {
		/// Underlying request failure.
		#[source]
		source: Box<Error>,
	},
	/// Profile endpoint answered with a body that is not the expected JSON envelope.
	#[error("Failed to parse user profile.")]
	ProfileParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Application verify callback failed.
	#[error("Verify callback failed.")]
	Verify {
		/// Application-supplied failure.
		#[source]
		source: BoxError,
	},
}
impl Error {
	/// Wraps an application error raised inside a verify callback.
	pub fn verify(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Verify { source: Box::new(src) }
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Configured endpoint URL cannot be parsed.
	#[error("The {endpoint} URL is invalid.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Redirect URI cannot be parsed.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},

	/// Client identifier is missing or empty.
	#[error("The client ID must not be empty.")]
	MissingClientId,
	/// Client secret is missing or empty.
	#[error("The client secret must not be empty.")]
	MissingClientSecret,
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Temporary failure variants (safe to retry).
#[derive(Debug, ThisError)]
pub enum TransientError {
	/// Provider returned an unexpected but non-fatal response.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	TokenEndpoint {
		/// Provider- or strategy-supplied message summarizing the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Token endpoint response could not be parsed (or re-encoded as JSON).
	#[error("Token endpoint returned malformed JSON.")]
	TokenResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}

/// Transport-level failures (network, IO, HTTP status).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
	/// Provider answered with a non-success HTTP status.
	#[error("Provider responded with HTTP status {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Raw response body, retained for diagnostics.
		body: Vec<u8>,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Returns the response body carried by [`TransportError::Status`], if any.
	pub fn body(&self) -> Option<&[u8]> {
		match self {
			Self::Status { body, .. } => Some(body),
			_ => None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_error_message_omits_body() {
		let err = TransportError::Status {
			status: 502,
			body: b"{\"secret\":\"do-not-print\"}".to_vec(),
			retry_after: None,
		};

		assert_eq!(err.to_string(), "Provider responded with HTTP status 502.");
		assert_eq!(err.body(), Some(&b"{\"secret\":\"do-not-print\"}"[..]));
	}

	#[test]
	fn profile_fetch_wraps_source() {
		let inner =
			Error::from(TransportError::Status { status: 401, body: Vec::new(), retry_after: None });
		let err = Error::ProfileFetch { source: Box::new(inner) };

		assert_eq!(err.to_string(), "Failed to fetch user profile.");
		assert!(StdError::source(&err).is_some());
	}
}
