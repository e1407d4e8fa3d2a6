//! OAuth 2.0 client capability consumed by the strategy.
//!
//! [`OAuthClient`] is the seam between the ARTIK Cloud strategy and the generic OAuth 2.0
//! machinery: authorize-URL construction, the token request primitive shared by code
//! exchanges and refreshes, a raw request primitive, and authenticated GETs.
//! [`BasicOAuthClient`] implements it on top of the `oauth2` crate and any
//! [`OAuthHttpClient`] transport.

pub use oauth2;

mod classify;

pub use classify::TokenErrorKind;

// std
use std::borrow::Cow;
// crates.io
use oauth2::{
	AsyncHttpClient, AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, EndpointNotSet,
	EndpointSet, HttpClientError, RedirectUrl, RefreshToken, RequestTokenError, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError},
	http::{HeaderName, Method, Request, header::AUTHORIZATION},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSet,
	config::{ClientAuthMethod, StrategyConfig},
	error::{ConfigError, TransientError, TransportError},
	http::{OAuthHttpClient, ResponseMetadata, ResponseMetadataSlot},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

type ConfiguredBasicClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Boxed future returned by [`OAuthClient`] operations.
pub type ClientFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Form parameters passed to [`OAuthClient::get_access_token`].
pub type TokenParams = BTreeMap<String, String>;

/// Parameter selecting the grant for [`OAuthClient::get_access_token`].
pub const GRANT_TYPE: &str = "grant_type";
/// Grant value that turns [`OAuthClient::get_access_token`] into a refresh.
pub const REFRESH_TOKEN_GRANT: &str = "refresh_token";
/// Grant value used for authorization-code exchanges.
pub const AUTHORIZATION_CODE_GRANT: &str = "authorization_code";
/// Parameter carrying the redirect URI of a code exchange.
pub const REDIRECT_URI: &str = "redirect_uri";

/// Successful (2xx) provider response returned by the raw request primitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Returns the body as text, replacing invalid UTF-8 sequences.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

/// Where [`OAuthClient::get`] places the access token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccessTokenPlacement {
	/// `access_token` query parameter.
	#[default]
	Query,
	/// `Authorization: Bearer <token>` header.
	Header,
}

/// OAuth 2.0 client capability used by the strategy.
pub trait OAuthClient: Send + Sync {
	/// Token endpoint URL.
	fn access_token_url(&self) -> &Url;

	/// Builds the authorization URL from `params` plus the client identifier.
	fn authorize_url(&self, params: &TokenParams) -> Url;

	/// Requests tokens from the token endpoint.
	///
	/// `code` is sent as the refresh token when `params` carries
	/// `grant_type=refresh_token`, and as the authorization code otherwise.
	fn get_access_token<'a>(&'a self, code: &'a str, params: TokenParams)
	-> ClientFuture<'a, TokenSet>;

	/// Issues a raw request; non-2xx statuses surface as [`TransportError::Status`].
	fn request<'a>(
		&'a self,
		method: Method,
		url: &'a Url,
		headers: Vec<(HeaderName, String)>,
		body: Vec<u8>,
	) -> ClientFuture<'a, RawResponse>;

	/// Issues an authenticated GET carrying `access_token`.
	fn get<'a>(&'a self, url: &'a Url, access_token: &'a str) -> ClientFuture<'a, RawResponse>;
}

/// Maps HTTP transport failures into strategy [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a strategy error.
	fn map_transport_error(
		&self,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(meta, *inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => map_generic_transport_error(meta, message),
			_ => map_unknown_transport_error(meta),
		}
	}
}

/// [`OAuthClient`] backed by the `oauth2` crate and an [`OAuthHttpClient`] transport.
pub struct BasicOAuthClient<C, M>
where
	C: ?Sized + OAuthHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	oauth_client: ConfiguredBasicClient,
	client_id: String,
	authorization_url: Url,
	token_url: Url,
	token_placement: AccessTokenPlacement,
	http_client: Arc<C>,
	error_mapper: Arc<M>,
}
impl<C, M> BasicOAuthClient<C, M>
where
	C: ?Sized + OAuthHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds a client for the configured endpoints and credentials.
	pub fn from_config(
		config: &StrategyConfig,
		http_client: impl Into<Arc<C>>,
		error_mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		if config.client_id.is_empty() {
			return Err(ConfigError::MissingClientId.into());
		}
		if config.client_secret.is_empty() {
			return Err(ConfigError::MissingClientSecret.into());
		}

		let auth_url = AuthUrl::new(config.endpoints.authorization.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "authorization", source })?;
		let token_url = TokenUrl::new(config.endpoints.token.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "token", source })?;
		let mut oauth_client = BasicClient::new(ClientId::new(config.client_id.clone()))
			.set_client_secret(ClientSecret::new(config.client_secret.clone()))
			.set_auth_uri(auth_url)
			.set_token_uri(token_url);

		if matches!(config.client_auth_method, ClientAuthMethod::ClientSecretPost) {
			oauth_client = oauth_client.set_auth_type(AuthType::RequestBody);
		}

		Ok(Self {
			oauth_client,
			client_id: config.client_id.clone(),
			authorization_url: config.endpoints.authorization.clone(),
			token_url: config.endpoints.token.clone(),
			token_placement: AccessTokenPlacement::default(),
			http_client: http_client.into(),
			error_mapper: error_mapper.into(),
		})
	}

	/// Sends access tokens for [`OAuthClient::get`] via the `Authorization` header when
	/// `enabled`, and via the `access_token` query parameter otherwise.
	pub fn use_authorization_header_for_get(mut self, enabled: bool) -> Self {
		self.token_placement =
			if enabled { AccessTokenPlacement::Header } else { AccessTokenPlacement::Query };

		self
	}

	/// Returns how [`OAuthClient::get`] places the access token.
	pub fn token_placement(&self) -> AccessTokenPlacement {
		self.token_placement
	}
}
#[cfg(feature = "reqwest")]
impl BasicOAuthClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Builds a client on the default reqwest transport.
	pub fn new(config: &StrategyConfig) -> Result<Self> {
		Self::from_config(config, ReqwestHttpClient::default(), ReqwestTransportErrorMapper)
	}
}
impl<C, M> OAuthClient for BasicOAuthClient<C, M>
where
	C: ?Sized + OAuthHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn access_token_url(&self) -> &Url {
		&self.token_url
	}

	fn authorize_url(&self, params: &TokenParams) -> Url {
		let mut url = self.authorization_url.clone();
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("client_id", &self.client_id);

		for (key, value) in params.iter().filter(|(key, _)| key.as_str() != "client_id") {
			pairs.append_pair(key, value);
		}

		drop(pairs);

		url
	}

	fn get_access_token<'a>(
		&'a self,
		code: &'a str,
		params: TokenParams,
	) -> ClientFuture<'a, TokenSet> {
		let meta = ResponseMetadataSlot::default();

		Box::pin(async move {
			let instrumented = self.http_client.with_metadata(meta.clone());
			let extra_params = params
				.iter()
				.filter(|(key, _)| {
					!matches!(
						key.as_str(),
						GRANT_TYPE | REDIRECT_URI | "code" | REFRESH_TOKEN_GRANT | "client_id"
					)
				})
				.collect::<Vec<_>>();
			let refresh = params.get(GRANT_TYPE).map(String::as_str) == Some(REFRESH_TOKEN_GRANT);
			let refresh_secret = RefreshToken::new(code.to_owned());
			let response = if refresh {
				let mut request = self.oauth_client.exchange_refresh_token(&refresh_secret);

				for (key, value) in &extra_params {
					request = request.add_extra_param(key.as_str(), value.as_str());
				}

				request.request_async(&instrumented).await
			} else {
				let mut request =
					self.oauth_client.exchange_code(AuthorizationCode::new(code.to_owned()));

				if let Some(redirect) = params.get(REDIRECT_URI) {
					let redirect_url = RedirectUrl::new(redirect.to_owned())
						.map_err(|source| ConfigError::InvalidRedirect { source })?;

					request = request.set_redirect_uri(Cow::Owned(redirect_url));
				}
				for (key, value) in &extra_params {
					request = request.add_extra_param(key.as_str(), value.as_str());
				}

				request.request_async(&instrumented).await
			}
			.map_err(|err| map_request_error(meta.take(), err, self.error_mapper.as_ref()))?;

			TokenSet::from_response(response)
		})
	}

	fn request<'a>(
		&'a self,
		method: Method,
		url: &'a Url,
		headers: Vec<(HeaderName, String)>,
		body: Vec<u8>,
	) -> ClientFuture<'a, RawResponse> {
		let meta = ResponseMetadataSlot::default();

		Box::pin(async move {
			let instrumented = self.http_client.with_metadata(meta.clone());
			let mut builder = Request::builder().method(method).uri(url.as_str());

			for (name, value) in headers {
				builder = builder.header(name, value);
			}

			let request = builder.body(body).map_err(ConfigError::from)?;
			let response = instrumented.call(request).await.map_err(|err| {
				self.error_mapper.map_transport_error(meta.take().as_ref(), err)
			})?;
			let status = response.status();
			let body = response.into_body();

			if !status.is_success() {
				return Err(TransportError::Status {
					status: status.as_u16(),
					body,
					retry_after: meta_retry_after(meta.take().as_ref()),
				}
				.into());
			}

			Ok(RawResponse { status: status.as_u16(), body })
		})
	}

	fn get<'a>(&'a self, url: &'a Url, access_token: &'a str) -> ClientFuture<'a, RawResponse> {
		let mut target = url.clone();
		let mut headers = Vec::new();

		match self.token_placement {
			AccessTokenPlacement::Header =>
				headers.push((AUTHORIZATION, format!("Bearer {access_token}"))),
			AccessTokenPlacement::Query => {
				target.query_pairs_mut().append_pair("access_token", access_token);
			},
		}

		Box::pin(async move { self.request(Method::GET, &target, headers, Vec::new()).await })
	}
}
impl<C, M> Debug for BasicOAuthClient<C, M>
where
	C: ?Sized + OAuthHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BasicOAuthClient")
			.field("client_id", &self.client_id)
			.field("authorization_url", &self.authorization_url)
			.field("token_url", &self.token_url)
			.field("token_placement", &self.token_placement)
			.finish()
	}
}

fn map_request_error<E, M>(
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<E>>,
	mapper: &M,
) -> Error
where
	E: 'static + Send + Sync + StdError,
	M: ?Sized + TransportErrorMapper<E>,
{
	let meta_ref = meta.as_ref();

	match err {
		RequestTokenError::ServerResponse(response) => map_server_response_error(response, meta_ref),
		RequestTokenError::Request(error) => mapper.map_transport_error(meta_ref, error),
		RequestTokenError::Parse(error, _body) =>
			TransientError::TokenResponseParse { source: error, status: meta_status(meta_ref) }
				.into(),
		RequestTokenError::Other(message) => TransientError::TokenEndpoint {
			message,
			status: meta_status(meta_ref),
			retry_after: meta_retry_after(meta_ref),
		}
		.into(),
	}
}

fn map_server_response_error(
	response: BasicErrorResponse,
	meta: Option<&ResponseMetadata>,
) -> Error {
	let code = response.error().as_ref();
	let description = response.error_description().map(String::as_str);
	let message = match description {
		Some(description) => format!("Token endpoint returned an OAuth error: {description}"),
		None => format!("Token endpoint returned an OAuth error: {code}"),
	};

	match classify::classify_token_error(Some(code), description, meta_status(meta)) {
		TokenErrorKind::InvalidGrant => Error::InvalidGrant { reason: message },
		TokenErrorKind::InvalidClient => Error::InvalidClient { reason: message },
		TokenErrorKind::InsufficientScope => Error::InsufficientScope { reason: message },
		TokenErrorKind::Transient => TransientError::TokenEndpoint {
			message,
			status: meta_status(meta),
			retry_after: meta_retry_after(meta),
		}
		.into(),
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(meta: Option<&ResponseMetadata>, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransientError::TokenEndpoint {
			message: "request timed out while calling the provider".into(),
			status: meta_status(meta).or_else(|| err.status().map(|code| code.as_u16())),
			retry_after: meta_retry_after(meta),
		}
		.into();
	}

	TransportError::from(err).into()
}

#[cfg(feature = "reqwest")]
fn map_generic_transport_error(meta: Option<&ResponseMetadata>, message: impl Display) -> Error {
	TransientError::TokenEndpoint {
		message: format!("HTTP client error occurred while calling the provider: {message}"),
		status: meta_status(meta),
		retry_after: meta_retry_after(meta),
	}
	.into()
}

#[cfg(feature = "reqwest")]
fn map_unknown_transport_error(meta: Option<&ResponseMetadata>) -> Error {
	TransientError::TokenEndpoint {
		message: "HTTP client error occurred while calling the provider".into(),
		status: meta_status(meta),
		retry_after: meta_retry_after(meta),
	}
	.into()
}

fn meta_status(meta: Option<&ResponseMetadata>) -> Option<u16> {
	meta.and_then(|value| value.status)
}

fn meta_retry_after(meta: Option<&ResponseMetadata>) -> Option<Duration> {
	meta.and_then(|value| value.retry_after)
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;

	fn config() -> StrategyConfig {
		StrategyConfig::builder()
			.client_id("client-id")
			.client_secret("secret")
			.authorization_url("https://accounts.example.com/authorize")
			.build()
			.expect("Config fixture should build.")
	}

	#[test]
	fn authorize_url_appends_client_id_and_params() {
		let client = BasicOAuthClient::new(&config()).expect("Client should build.");
		let params = TokenParams::from([
			("response_type".to_owned(), "token".to_owned()),
			("client_id".to_owned(), "spoofed".to_owned()),
		]);
		let url = client.authorize_url(&params);
		let pairs = url.query_pairs().into_owned().collect::<Vec<_>>();

		assert_eq!(url.path(), "/authorize");
		assert_eq!(
			pairs,
			vec![
				("client_id".to_owned(), "client-id".to_owned()),
				("response_type".to_owned(), "token".to_owned()),
			]
		);
	}

	#[test]
	fn token_placement_defaults_to_query() {
		let client = BasicOAuthClient::new(&config()).expect("Client should build.");

		assert_eq!(client.token_placement(), AccessTokenPlacement::Query);
		assert_eq!(
			client.use_authorization_header_for_get(true).token_placement(),
			AccessTokenPlacement::Header
		);
	}

	#[test]
	fn rejects_empty_credentials() {
		let mut config = config();

		config.client_secret.clear();

		let err = BasicOAuthClient::new(&config).expect_err("Empty secret should be rejected.");

		assert!(matches!(err, Error::Config(ConfigError::MissingClientSecret)));
	}
}
