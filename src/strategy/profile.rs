// self
use crate::{
	_prelude::*,
	auth::{Profile, profile::ProfileEnvelope},
	error::TransportError,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	strategy::ArtikCloudStrategy,
};

impl ArtikCloudStrategy {
	/// Fetches the authenticated user's profile and normalizes it.
	///
	/// The provider wraps the user object in `{"data": {...}}`; the returned [`Profile`] is
	/// that object with the access token added under `accessToken`.
	pub async fn user_profile(&self, access_token: &str) -> Result<Profile> {
		const KIND: FlowKind = FlowKind::Profile;

		let span = FlowSpan::new(KIND, "user_profile");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let response =
					match self.client.get(&self.config.endpoints.profile, access_token).await {
						Ok(response) => response,
						Err(err) => {
							if let Error::Transport(TransportError::Status { status, body, .. }) = &err {
								if let Ok(json) = serde_json::from_slice::<JsonValue>(body) {
									obs::record_error_body(KIND, Some(*status), &json);
								}
							}

							return Err(Error::ProfileFetch { source: Box::new(err) });
						},
					};
				let envelope = super::parse_json::<ProfileEnvelope>(&response.body)
					.map_err(|source| Error::ProfileParse { source })?;

				Ok(Profile::from_data(envelope.data, access_token))
			})
			.await;

		obs::record_flow_outcome(
			KIND,
			if result.is_ok() { FlowOutcome::Success } else { FlowOutcome::Failure },
		);

		result
	}
}
