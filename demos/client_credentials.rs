//! Demonstrates the client-credentials mode against a mocked ARTIK Cloud token endpoint,
//! printing the signals the strategy hands to its host.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use artikcloud_oauth2::{
	config::StrategyConfig,
	http::ReqwestHttpClient,
	oauth::ReqwestTransportErrorMapper,
	reqwest::Client,
	strategy::{
		ArtikCloudStrategy, AuthRequest, AuthenticateOptions, Signal, SignalLog, Verified,
		VerifyContext,
	},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token").body("grant_type=client_credentials");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-app-token\",\"token_type\":\"bearer\",\"expires_in\":1209600}",
			);
		})
		.await;
	let config = StrategyConfig::builder()
		.client_id("demo-client")
		.client_secret("super-secret")
		.token_url(server.url("/token"))
		.build()?;
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let strategy = ArtikCloudStrategy::with_http_client(
		config,
		|ctx: VerifyContext| async move {
			Ok::<_, artikcloud_oauth2::error::Error>(Verified::success(
				ctx.profile.and_then(|profile| profile.id().map(ToOwned::to_owned)),
			))
		},
		http_client,
		ReqwestTransportErrorMapper,
	)?;
	let request = server.url("/login").parse::<AuthRequest>()?;
	let mut host = SignalLog::default();

	strategy.authenticate(&request, &AuthenticateOptions::client_credentials(), &mut host).await;

	for signal in host.into_signals() {
		match signal {
			Signal::Success { user, .. } => println!("Application token: {}.", user["access_token"]),
			Signal::Pass => println!("Request passed to the next handler."),
			Signal::Error(err) => return Err(err.into()),
			other => println!("Unexpected signal: {other:?}."),
		}
	}

	token_mock.assert_async().await;

	Ok(())
}
