//! Client credentials mode: a direct token request authenticated with HTTP Basic.

// crates.io
use oauth2::http::{
	Method,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	error::TransientError,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	strategy::{ArtikCloudStrategy, AuthHost},
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const CLIENT_CREDENTIALS_BODY: &[u8] = b"grant_type=client_credentials";

impl ArtikCloudStrategy {
	/// Requests an application token from the token endpoint.
	///
	/// Returns the parsed JSON response together with the raw body text.
	pub async fn client_credentials_token(&self) -> Result<(JsonValue, String)> {
		const KIND: FlowKind = FlowKind::ClientCredentials;

		let span = FlowSpan::new(KIND, "client_credentials_token");

		span.instrument(async move {
			let headers = vec![
				(CONTENT_TYPE, FORM_CONTENT_TYPE.to_owned()),
				(AUTHORIZATION, self.basic_credential.header_value()),
			];
			let response = self
				.client
				.request(
					Method::POST,
					self.client.access_token_url(),
					headers,
					CLIENT_CREDENTIALS_BODY.to_vec(),
				)
				.await?;
			let parsed = super::parse_json::<JsonValue>(&response.body).map_err(|source| {
				TransientError::TokenResponseParse { source, status: Some(response.status) }
			})?;

			Ok((parsed, response.text()))
		})
		.await
	}

	pub(super) async fn authenticate_client_credentials(&self, host: &mut dyn AuthHost) {
		const KIND: FlowKind = FlowKind::ClientCredentials;

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		match self.client_credentials_token().await {
			Ok((token, raw)) => {
				obs::record_flow_outcome(KIND, FlowOutcome::Success);
				host.success(token, JsonValue::String(raw));
				host.pass();
			},
			Err(err) => {
				obs::record_flow_outcome(KIND, FlowOutcome::Failure);
				host.error(err);
			},
		}
	}
}
