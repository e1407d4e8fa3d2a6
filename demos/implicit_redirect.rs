//! Demonstrates the implicit mode: the strategy only builds the authorization redirect, so no
//! provider call is made.

// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use artikcloud_oauth2::{
	config::StrategyConfig,
	strategy::{
		ArtikCloudStrategy, AuthRequest, AuthenticateOptions, DisplayMode, Signal, SignalLog,
		Verified, VerifyContext,
	},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = StrategyConfig::builder()
		.client_id("demo-client")
		.client_secret("super-secret")
		.callback_url("/auth/artikcloud/callback")
		.scope(["read", "write"])
		.build()?;
	let strategy = ArtikCloudStrategy::new(config, |_ctx: VerifyContext| async {
		Ok::<_, artikcloud_oauth2::error::Error>(Verified::fail("Implicit logins are not verified."))
	})?;
	let request = "https://app.example.com/login".parse::<AuthRequest>()?;
	let options = AuthenticateOptions::implicit().with_display(DisplayMode::Touch);
	let mut host = SignalLog::default();

	strategy.authenticate(&request, &options, &mut host).await;

	match host.into_signals().as_slice() {
		[Signal::Redirect(url)] => println!("Redirect the user agent to {url}."),
		other => return Err(eyre!("unexpected signals: {other:?}")),
	}

	Ok(())
}
