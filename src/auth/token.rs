//! Normalized token endpoint responses.

// crates.io
use oauth2::TokenResponse;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::{ConfigError, TransientError},
};

/// Tokens issued by the authorization-code or refresh grants.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenSet {
	/// Access token used for authenticated resource requests.
	pub access_token: TokenSecret,
	/// Refresh token, when the provider issued one.
	pub refresh_token: Option<TokenSecret>,
	/// Token type reported by the provider (usually `bearer`).
	pub token_type: String,
	/// Relative lifetime of the access token, when reported.
	pub expires_in: Option<Duration>,
	/// Scopes reported by the provider, when present.
	pub scopes: Option<Vec<String>>,
	/// Full token response as returned by the provider.
	pub params: JsonValue,
}
impl TokenSet {
	pub(crate) fn from_response(response: oauth2::basic::BasicTokenResponse) -> Result<Self> {
		let expires_in = response
			.expires_in()
			.map(|lifetime| {
				i64::try_from(lifetime.as_secs())
					.map(Duration::seconds)
					.map_err(|_| ConfigError::ExpiresInOutOfRange)
			})
			.transpose()?;
		let params = serde_path_to_error::serialize(&response, serde_json::value::Serializer)
			.map_err(|source| TransientError::TokenResponseParse { source, status: None })?;

		Ok(Self {
			access_token: TokenSecret::new(response.access_token().secret().to_owned()),
			refresh_token: response
				.refresh_token()
				.map(|token| TokenSecret::new(token.secret().to_owned())),
			token_type: response.token_type().as_ref().to_owned(),
			expires_in,
			scopes: response
				.scopes()
				.map(|scopes| scopes.iter().map(|scope| scope.as_str().to_owned()).collect()),
			params,
		})
	}
}
