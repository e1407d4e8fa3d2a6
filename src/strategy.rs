//! ARTIK Cloud authentication strategy.
//!
//! [`ArtikCloudStrategy`] composes an immutable [`StrategyConfig`], a precomputed
//! [`BasicCredential`], an [`OAuthClient`] handle, and the application's [`Verify`]
//! callback. [`ArtikCloudStrategy::authenticate`] dispatches each request as follows and
//! reports the outcome through an [`AuthHost`]:
//!
//! 1. a request to the callback path without any query parameters is passed through;
//! 2. `implicit` redirects to the authorization endpoint with `client_id` and
//!    `response_type=token` only;
//! 3. `client_credentials` POSTs straight to the token endpoint with HTTP Basic auth;
//! 4. anything else runs the authorization-code redirect/callback exchange.

pub mod host;
pub mod options;
pub mod request;
pub mod verify;

mod authorization_code;
mod client_credentials;
mod implicit;
mod profile;
mod refresh;

pub use host::*;
pub use options::*;
pub use refresh::refresh_params;
pub use request::*;
pub use verify::*;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::BasicCredential,
	config::StrategyConfig,
	http::OAuthHttpClient,
	oauth::{BasicOAuthClient, OAuthClient, TokenParams, TransportErrorMapper},
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

/// Strategy name registered with the host.
pub const NAME: &str = "artikcloud";

/// ARTIK Cloud OAuth 2.0 strategy.
pub struct ArtikCloudStrategy {
	config: StrategyConfig,
	basic_credential: BasicCredential,
	client: Arc<dyn OAuthClient>,
	verify: Arc<dyn Verify>,
}
impl ArtikCloudStrategy {
	/// Builds a strategy on the default reqwest transport.
	#[cfg(feature = "reqwest")]
	pub fn new(config: StrategyConfig, verify: impl 'static + Verify) -> Result<Self> {
		Self::with_http_client(
			config,
			verify,
			ReqwestHttpClient::default(),
			ReqwestTransportErrorMapper,
		)
	}

	/// Builds a strategy on a caller-provided transport + error mapper pair.
	///
	/// The owned OAuth client sends access tokens for GET requests in the `Authorization`
	/// header.
	pub fn with_http_client<C, M>(
		config: StrategyConfig,
		verify: impl 'static + Verify,
		http_client: C,
		error_mapper: M,
	) -> Result<Self>
	where
		C: OAuthHttpClient,
		M: TransportErrorMapper<C::TransportError>,
	{
		let client = <BasicOAuthClient<C, M>>::from_config(&config, http_client, error_mapper)?
			.use_authorization_header_for_get(true);

		Self::with_oauth_client(config, verify, Arc::new(client))
	}

	/// Builds a strategy around any [`OAuthClient`] implementation.
	///
	/// The client is expected to authenticate [`OAuthClient::get`] with a bearer header.
	pub fn with_oauth_client(
		config: StrategyConfig,
		verify: impl 'static + Verify,
		client: Arc<dyn OAuthClient>,
	) -> Result<Self> {
		let basic_credential = BasicCredential::new(&config.client_id, &config.client_secret)?;

		Ok(Self { config, basic_credential, client, verify: Arc::new(verify) })
	}

	/// Strategy name registered with the host.
	pub fn name(&self) -> &'static str {
		NAME
	}

	/// Configuration the strategy was built with.
	pub fn config(&self) -> &StrategyConfig {
		&self.config
	}

	/// Credential sent by the client credentials mode.
	pub fn basic_credential(&self) -> &BasicCredential {
		&self.basic_credential
	}

	/// Provider logout endpoint.
	pub fn logout_url(&self) -> &Url {
		&self.config.endpoints.logout
	}

	/// Authenticates one request, reporting the outcome through `host`.
	pub async fn authenticate(
		&self,
		request: &AuthRequest,
		options: &AuthenticateOptions,
		host: &mut dyn AuthHost,
	) {
		if self.is_bare_callback(request) {
			host.pass();

			return;
		}

		match options.auth_type {
			AuthType::Implicit => self.authenticate_implicit(options, host),
			AuthType::ClientCredentials => self.authenticate_client_credentials(host).await,
			AuthType::AuthorizationCode =>
				self.authenticate_authorization_code(request, options, host).await,
		}
	}

	/// Extra authorization parameters for `options`: `response_type=token` (and `display`,
	/// when set) in implicit mode, nothing otherwise.
	pub fn authorization_params(&self, options: &AuthenticateOptions) -> TokenParams {
		let mut params = TokenParams::new();

		if options.auth_type == AuthType::Implicit {
			params.insert("response_type".into(), "token".into());

			if let Some(display) = options.display {
				params.insert("display".into(), display.as_str().into());
			}
		}

		params
	}

	fn is_bare_callback(&self, request: &AuthRequest) -> bool {
		self.config.callback_path() == Some(request.path()) && request.query.is_empty()
	}

	fn scope_param(&self, options: &AuthenticateOptions) -> Option<String> {
		self.config.format_scope(options.scope.as_deref().unwrap_or(self.config.scope.as_slice()))
	}

	fn standard_params(&self, request: &AuthRequest, options: &AuthenticateOptions) -> TokenParams {
		let mut params = TokenParams::new();

		if let Some(redirect) = self.config.resolve_callback(&request.url) {
			params.insert(crate::oauth::REDIRECT_URI.into(), redirect.into());
		}
		if let Some(scope) = self.scope_param(options) {
			params.insert("scope".into(), scope);
		}

		params
	}
}
impl Debug for ArtikCloudStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ArtikCloudStrategy")
			.field("name", &NAME)
			.field("config", &self.config)
			.field("basic_credential", &self.basic_credential)
			.finish()
	}
}

pub(crate) fn parse_json<T>(body: &[u8]) -> Result<T, serde_path_to_error::Error<serde_json::Error>>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(&mut serde_json::Deserializer::from_slice(body))
}
