#![cfg(feature = "reqwest")]

// self
use artikcloud_oauth2::{
	_preludet::*,
	config::StrategyConfig,
	error::{ConfigError, TransientError, TransportError},
	http::{OAuthHttpClient, ResponseMetadata, ResponseMetadataSlot},
	oauth::{
		GRANT_TYPE, TokenParams, TransportErrorMapper,
		oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse},
	},
	strategy::{
		ArtikCloudStrategy, AuthRequest, AuthenticateOptions, Signal, SignalLog, Verified,
		VerifyContext,
	},
};

#[derive(Debug)]
enum FakeTransportError {
	Throttled,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Throttled => write!(f, "Transport throttled."),
		}
	}
}
impl StdError for FakeTransportError {}

#[derive(Clone, Debug)]
struct RecordedRequest {
	method: String,
	uri: String,
	authorization: Option<String>,
	body: String,
}

/// Fake transport that records every request and either answers with `response` or fails
/// as throttled.
#[derive(Clone, Default)]
struct FakeHttpClient {
	response: Option<&'static str>,
	retry_after: Option<Duration>,
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
}
impl FakeHttpClient {
	fn responding(body: &'static str) -> Self {
		Self { response: Some(body), ..Default::default() }
	}

	fn throttled(retry_after: Duration) -> Self {
		Self { retry_after: Some(retry_after), ..Default::default() }
	}

	fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.lock().clone()
	}
}
impl OAuthHttpClient for FakeHttpClient {
	type Handle = FakeHttpHandle;
	type TransportError = FakeTransportError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		FakeHttpHandle { slot, client: self.clone() }
	}
}

struct FakeHttpHandle {
	slot: ResponseMetadataSlot,
	client: FakeHttpClient,
}
impl<'a> AsyncHttpClient<'a> for FakeHttpHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, request: HttpRequest) -> Self::Future {
		let slot = self.slot.clone();
		let client = self.client.clone();

		Box::pin(async move {
			assert!(
				slot.take().is_none(),
				"ResponseMetadataSlot must be clear before dispatching a request."
			);

			client.requests.lock().push(RecordedRequest {
				method: request.method().to_string(),
				uri: request.uri().to_string(),
				authorization: request
					.headers()
					.get("authorization")
					.and_then(|value| value.to_str().ok())
					.map(ToOwned::to_owned),
				body: String::from_utf8_lossy(request.body()).into_owned(),
			});

			let Some(body) = client.response else {
				slot.store(ResponseMetadata { status: Some(429), retry_after: client.retry_after });

				return Err(HttpClientError::Reqwest(Box::new(FakeTransportError::Throttled)));
			};

			slot.store(ResponseMetadata { status: Some(200), retry_after: None });

			let mut response = HttpResponse::new(body.as_bytes().to_vec());

			response.headers_mut().insert(
				"content-type",
				"application/json".parse().expect("Content type header should parse."),
			);

			Ok(response)
		})
	}
}

#[derive(Clone, Default)]
struct RecordingTransportErrorMapper {
	metadata: Arc<Mutex<Vec<Option<ResponseMetadata>>>>,
}
impl RecordingTransportErrorMapper {
	fn recorded_metadata(&self) -> Vec<Option<ResponseMetadata>> {
		self.metadata.lock().clone()
	}
}
impl TransportErrorMapper<FakeTransportError> for RecordingTransportErrorMapper {
	fn map_transport_error(
		&self,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<FakeTransportError>,
	) -> Error {
		let status = meta.and_then(|value| value.status);
		let retry_after = meta.and_then(|value| value.retry_after);

		self.metadata.lock().push(meta.cloned());

		match err {
			HttpClientError::Reqwest(inner) => TransientError::TokenEndpoint {
				message: format!("Fake transport error: {inner}"),
				status,
				retry_after,
			}
			.into(),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			other => TransientError::TokenEndpoint {
				message: format!("Unhandled fake transport error: {other:?}"),
				status,
				retry_after,
			}
			.into(),
		}
	}
}

fn fake_config() -> StrategyConfig {
	test_config("https://fake.artik.test")
}

fn build_strategy(
	http_client: FakeHttpClient,
	mapper: RecordingTransportErrorMapper,
) -> ArtikCloudStrategy {
	ArtikCloudStrategy::with_http_client(
		fake_config(),
		|_ctx: VerifyContext| async { Ok::<_, Error>(Verified::success("fake-user")) },
		http_client,
		mapper,
	)
	.expect("Fake strategy should build.")
}

#[tokio::test]
async fn client_credentials_transport_failure_signals_error_only() {
	let http_client = FakeHttpClient::throttled(Duration::seconds(5));
	let mapper = RecordingTransportErrorMapper::default();
	let strategy = build_strategy(http_client.clone(), mapper.clone());
	let request =
		"https://fake.artik.test/login".parse::<AuthRequest>().expect("Request URL should parse.");
	let mut host = SignalLog::default();

	strategy.authenticate(&request, &AuthenticateOptions::client_credentials(), &mut host).await;

	match host.signals() {
		[Signal::Error(Error::Transient(TransientError::TokenEndpoint { status, retry_after, .. }))] =>
		{
			assert_eq!(*status, Some(429));
			assert_eq!(*retry_after, Some(Duration::seconds(5)));
		},
		other => panic!("Unexpected signals: {other:?}."),
	}

	let requests = http_client.requests();

	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].method, "POST");
	assert_eq!(requests[0].uri, "https://fake.artik.test/token");
	assert_eq!(
		requests[0].authorization.as_deref(),
		Some("Basic YXJ0aWstY2xpZW50OmFydGlrLXNlY3JldA==")
	);
	assert_eq!(requests[0].body, "grant_type=client_credentials");

	let observed = mapper.recorded_metadata();

	assert_eq!(observed.len(), 1, "Mapper must record a single request.");
	assert_eq!(
		observed[0].as_ref().and_then(|meta| meta.retry_after),
		Some(Duration::seconds(5))
	);
}

#[tokio::test]
async fn refresh_request_carries_refresh_grant_and_extra_params() {
	let http_client = FakeHttpClient::responding(
		"{\"access_token\":\"fake-access\",\"token_type\":\"bearer\",\"expires_in\":60}",
	);
	let strategy = build_strategy(http_client.clone(), RecordingTransportErrorMapper::default());
	let params = TokenParams::from([
		(GRANT_TYPE.to_owned(), "client_credentials".to_owned()),
		("device_type".to_owned(), "dt-42".to_owned()),
	]);
	let tokens = strategy
		.refresh_token("fake-refresh", params)
		.await
		.expect("Fake refresh should succeed.");

	assert_eq!(tokens.access_token.expose(), "fake-access");
	assert_eq!(tokens.expires_in, Some(Duration::seconds(60)));

	let requests = http_client.requests();

	assert_eq!(requests.len(), 1);

	let body = &requests[0].body;

	assert!(body.contains("grant_type=refresh_token"), "Unexpected body: {body}.");
	assert!(body.contains("refresh_token=fake-refresh"), "Unexpected body: {body}.");
	assert!(body.contains("device_type=dt-42"), "Unexpected body: {body}.");
	assert!(!body.contains("client_credentials"), "Unexpected body: {body}.");
}

#[tokio::test]
async fn profile_request_uses_bearer_header() {
	let http_client = FakeHttpClient::responding("{\"data\":{\"id\":\"fake-user\"}}");
	let strategy = build_strategy(http_client.clone(), RecordingTransportErrorMapper::default());
	let profile = strategy.user_profile("bearer-token").await.expect("Fake profile should parse.");

	assert_eq!(profile.id(), Some("fake-user"));

	let requests = http_client.requests();

	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].method, "GET");
	assert_eq!(requests[0].uri, "https://fake.artik.test/v1.1/users/self");
	assert_eq!(requests[0].authorization.as_deref(), Some("Bearer bearer-token"));
}
