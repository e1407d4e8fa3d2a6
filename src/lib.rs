//! ARTIK Cloud OAuth 2.0 strategy: authorization code, implicit, and client credentials modes
//! with profile normalization, layered on the `oauth2` crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod strategy;
#[cfg(feature = "reqwest")]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::StrategyConfig,
		http::ReqwestHttpClient,
		oauth::ReqwestTransportErrorMapper,
		strategy::{ArtikCloudStrategy, Verified, VerifyContext},
	};

	/// Client identifier shared by integration tests.
	pub const TEST_CLIENT_ID: &str = "artik-client";
	/// Client secret shared by integration tests.
	pub const TEST_CLIENT_SECRET: &str = "artik-secret";

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Builds a strategy config whose endpoints live under `base` (usually an `httpmock`
	/// server URL).
	pub fn test_config(base: &str) -> StrategyConfig {
		StrategyConfig::builder()
			.client_id(TEST_CLIENT_ID)
			.client_secret(TEST_CLIENT_SECRET)
			.callback_url(format!("{base}/auth/artikcloud/callback"))
			.authorization_url(format!("{base}/authorize"))
			.token_url(format!("{base}/token"))
			.profile_url(format!("{base}/v1.1/users/self"))
			.logout_url(format!("{base}/v1.1/logout"))
			.build()
			.expect("Failed to build test strategy config.")
	}

	/// Constructs an [`ArtikCloudStrategy`] on the insecure test transport whose verify
	/// callback accepts every profile and returns its `id` as the user.
	pub fn build_reqwest_test_strategy(config: StrategyConfig) -> ArtikCloudStrategy {
		ArtikCloudStrategy::with_http_client(
			config,
			|ctx: VerifyContext| async move {
				let user = ctx
					.profile
					.as_ref()
					.and_then(|profile| profile.get("id").cloned())
					.unwrap_or(serde_json::Value::Null);

				Ok::<_, Error>(Verified::success(user))
			},
			test_reqwest_http_client(),
			ReqwestTransportErrorMapper,
		)
		.expect("Failed to build test strategy.")
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value as JsonValue};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
