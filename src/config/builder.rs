// self
use crate::{
	_prelude::*,
	config::{
		ClientAuthMethod, DEFAULT_AUTHORIZATION_URL, DEFAULT_LOGOUT_URL, DEFAULT_PROFILE_URL,
		DEFAULT_TOKEN_URL, Endpoints, StrategyConfig,
	},
	error::ConfigError,
};

/// Builder for [`StrategyConfig`] values.
///
/// Deserializes from camelCase keys; the historical `clientID`, `clientSecret`,
/// `callbackURL`, `authorizationURL`, `tokenURL`, `profileURL`, and `logoutURL` spellings are
/// accepted as aliases. Unset endpoints fall back to the ARTIK Cloud production URLs.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StrategyConfigBuilder {
	/// OAuth 2.0 client identifier (required).
	#[serde(alias = "clientID")]
	pub client_id: Option<String>,
	/// OAuth 2.0 client secret (required).
	pub client_secret: Option<String>,
	/// Callback URL registered with the provider.
	#[serde(alias = "callbackURL")]
	pub callback_url: Option<String>,
	/// Authorization endpoint override.
	#[serde(alias = "authorizationURL")]
	pub authorization_url: Option<String>,
	/// Token endpoint override.
	#[serde(alias = "tokenURL")]
	pub token_url: Option<String>,
	/// Profile endpoint override.
	#[serde(alias = "profileURL")]
	pub profile_url: Option<String>,
	/// Logout endpoint override.
	#[serde(alias = "logoutURL")]
	pub logout_url: Option<String>,
	/// Default scopes requested on authorization redirects.
	pub scope: Vec<String>,
	/// Separator used when joining scopes (defaults to a single space).
	pub scope_separator: Option<String>,
	/// Skips the profile fetch after a code exchange.
	pub skip_user_profile: bool,
	/// Client authentication for token requests issued through the OAuth client.
	pub client_auth_method: ClientAuthMethod,
}
impl StrategyConfigBuilder {
	/// Sets the client identifier.
	pub fn client_id(mut self, value: impl Into<String>) -> Self {
		self.client_id = Some(value.into());

		self
	}

	/// Sets the client secret.
	pub fn client_secret(mut self, value: impl Into<String>) -> Self {
		self.client_secret = Some(value.into());

		self
	}

	/// Sets the callback URL (absolute, or a path resolved against each request).
	pub fn callback_url(mut self, value: impl Into<String>) -> Self {
		self.callback_url = Some(value.into());

		self
	}

	/// Overrides the authorization endpoint.
	pub fn authorization_url(mut self, value: impl Into<String>) -> Self {
		self.authorization_url = Some(value.into());

		self
	}

	/// Overrides the token endpoint.
	pub fn token_url(mut self, value: impl Into<String>) -> Self {
		self.token_url = Some(value.into());

		self
	}

	/// Overrides the profile endpoint.
	pub fn profile_url(mut self, value: impl Into<String>) -> Self {
		self.profile_url = Some(value.into());

		self
	}

	/// Overrides the logout endpoint.
	pub fn logout_url(mut self, value: impl Into<String>) -> Self {
		self.logout_url = Some(value.into());

		self
	}

	/// Replaces the default scope list.
	pub fn scope<I, S>(mut self, scope: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scope = scope.into_iter().map(Into::into).collect();

		self
	}

	/// Overrides the scope separator.
	pub fn scope_separator(mut self, value: impl Into<String>) -> Self {
		self.scope_separator = Some(value.into());

		self
	}

	/// Toggles the profile fetch after code exchanges.
	pub fn skip_user_profile(mut self, skip: bool) -> Self {
		self.skip_user_profile = skip;

		self
	}

	/// Overrides the client authentication method for token requests.
	pub fn client_auth_method(mut self, method: ClientAuthMethod) -> Self {
		self.client_auth_method = method;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<StrategyConfig, ConfigError> {
		let client_id = self.client_id.filter(|value| !value.is_empty());
		let client_id = client_id.ok_or(ConfigError::MissingClientId)?;
		let client_secret = self.client_secret.filter(|value| !value.is_empty());
		let client_secret = client_secret.ok_or(ConfigError::MissingClientSecret)?;
		let endpoints = Endpoints {
			authorization: parse_endpoint(
				"authorization",
				self.authorization_url.as_deref(),
				DEFAULT_AUTHORIZATION_URL,
			)?,
			token: parse_endpoint("token", self.token_url.as_deref(), DEFAULT_TOKEN_URL)?,
			profile: parse_endpoint("profile", self.profile_url.as_deref(), DEFAULT_PROFILE_URL)?,
			logout: parse_endpoint("logout", self.logout_url.as_deref(), DEFAULT_LOGOUT_URL)?,
		};
		let callback_path = self.callback_url.as_deref().and_then(super::callback_path);

		Ok(StrategyConfig {
			client_id,
			client_secret,
			callback_url: self.callback_url,
			endpoints,
			scope: self.scope,
			scope_separator: self.scope_separator.unwrap_or_else(|| " ".into()),
			skip_user_profile: self.skip_user_profile,
			client_auth_method: self.client_auth_method,
			callback_path,
		})
	}
}

fn parse_endpoint(
	endpoint: &'static str,
	value: Option<&str>,
	default: &str,
) -> Result<Url, ConfigError> {
	Url::parse(value.unwrap_or(default))
		.map_err(|source| ConfigError::InvalidEndpoint { endpoint, source })
}
