//! Strategy configuration with ARTIK Cloud defaults.
//!
//! [`StrategyConfig`] is built once at startup through [`StrategyConfigBuilder`] (either
//! programmatically or by deserializing a config file section) and stays immutable for the
//! lifetime of the strategy.

/// Builder API and serde surface for strategy configuration.
pub mod builder;

pub use builder::*;

// self
use crate::_prelude::*;

/// Default authorization endpoint.
pub const DEFAULT_AUTHORIZATION_URL: &str = "https://accounts.artik.cloud/authorize";
/// Default token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.artik.cloud/token";
/// Default profile endpoint.
pub const DEFAULT_PROFILE_URL: &str = "https://api.artik.cloud/v1.1/users/self";
/// Default logout endpoint.
pub const DEFAULT_LOGOUT_URL: &str = "https://api.artik.cloud/v1.1/logout";

/// Client authentication used for authorization-code and refresh token requests.
///
/// The client-credentials mode always authenticates with HTTP Basic regardless of this
/// setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
	/// Form POST body parameters for `client_id`/`client_secret`.
	#[default]
	ClientSecretPost,
	/// HTTP Basic with `client_id`/`client_secret`.
	ClientSecretBasic,
}

/// Endpoint set used by the strategy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
	/// Authorization endpoint for the authorization-code and implicit modes.
	pub authorization: Url,
	/// Token endpoint for code exchanges, refreshes, and client credentials.
	pub token: Url,
	/// Profile endpoint returning `{"data": {...}}`.
	pub profile: Url,
	/// Logout endpoint, exposed for applications that end provider sessions.
	pub logout: Url,
}

/// Immutable, validated strategy configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct StrategyConfig {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: String,
	/// Callback URL as configured; may be absolute or a path relative to the request.
	pub callback_url: Option<String>,
	/// Provider endpoints.
	pub endpoints: Endpoints,
	/// Default scopes requested on authorization redirects.
	pub scope: Vec<String>,
	/// Separator used when joining scopes.
	pub scope_separator: String,
	/// Skips the profile fetch after a code exchange.
	pub skip_user_profile: bool,
	/// Client authentication for token requests issued through the OAuth client.
	pub client_auth_method: ClientAuthMethod,
	callback_path: Option<String>,
}
impl StrategyConfig {
	/// Creates a builder seeded with the ARTIK Cloud endpoints.
	pub fn builder() -> StrategyConfigBuilder {
		StrategyConfigBuilder::default()
	}

	/// Path component of the callback URL, computed when the config was built.
	pub fn callback_path(&self) -> Option<&str> {
		self.callback_path.as_deref()
	}

	/// Resolves the callback URL against the URL of the request being handled.
	pub fn resolve_callback(&self, request_url: &Url) -> Option<Url> {
		let raw = self.callback_url.as_deref()?;

		match Url::parse(raw) {
			Ok(url) => Some(url),
			Err(url::ParseError::RelativeUrlWithoutBase) => request_url.join(raw).ok(),
			Err(_) => None,
		}
	}

	/// Joins scopes with the configured separator, or returns `None` when empty.
	pub fn format_scope(&self, scope: &[String]) -> Option<String> {
		if scope.is_empty() { None } else { Some(scope.join(&self.scope_separator)) }
	}
}

impl Debug for StrategyConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StrategyConfig")
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("callback_url", &self.callback_url)
			.field("endpoints", &self.endpoints)
			.field("scope", &self.scope)
			.field("scope_separator", &self.scope_separator)
			.field("skip_user_profile", &self.skip_user_profile)
			.field("client_auth_method", &self.client_auth_method)
			.finish()
	}
}

fn callback_path(raw: &str) -> Option<String> {
	match Url::parse(raw) {
		Ok(url) => Some(url.path().to_owned()),
		Err(url::ParseError::RelativeUrlWithoutBase) =>
			raw.split(['?', '#']).next().map(ToOwned::to_owned),
		Err(_) => None,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn config(callback: &str) -> StrategyConfig {
		StrategyConfig::builder()
			.client_id("id")
			.client_secret("secret")
			.callback_url(callback)
			.build()
			.expect("Config fixture should build.")
	}

	#[test]
	fn callback_path_handles_absolute_and_relative_urls() {
		assert_eq!(
			config("https://www.example.net/auth/example/callback?x=1").callback_path(),
			Some("/auth/example/callback")
		);
		assert_eq!(config("/auth/artik/callback?x=1").callback_path(), Some("/auth/artik/callback"));
	}

	#[test]
	fn relative_callback_resolves_against_request() {
		let request = Url::parse("https://app.example.com/login?next=/")
			.expect("Request URL fixture should parse.");

		assert_eq!(
			config("/auth/artik/callback").resolve_callback(&request).map(String::from),
			Some("https://app.example.com/auth/artik/callback".to_owned())
		);
		assert_eq!(
			config("https://cb.example.com/cb").resolve_callback(&request).map(String::from),
			Some("https://cb.example.com/cb".to_owned())
		);
	}

	#[test]
	fn scope_formatting_uses_separator() {
		let mut config = config("/cb");

		assert_eq!(config.format_scope(&[]), None);

		config.scope_separator = ",".into();

		assert_eq!(
			config.format_scope(&["read".into(), "write".into()]),
			Some("read,write".into())
		);
	}
}
