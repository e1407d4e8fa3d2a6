// self
use crate::{
	_prelude::*,
	auth::TokenSet,
	oauth::{GRANT_TYPE, REFRESH_TOKEN_GRANT, TokenParams},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	strategy::ArtikCloudStrategy,
};

/// Forces `grant_type=refresh_token`, replacing any caller-supplied grant.
pub fn refresh_params(mut params: TokenParams) -> TokenParams {
	params.insert(GRANT_TYPE.into(), REFRESH_TOKEN_GRANT.into());

	params
}

impl ArtikCloudStrategy {
	/// Exchanges `refresh_token` for a fresh [`TokenSet`].
	///
	/// Extra `params` are forwarded to the token endpoint.
	pub async fn refresh_token(&self, refresh_token: &str, params: TokenParams) -> Result<TokenSet> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, "refresh_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(self.client.get_access_token(refresh_token, refresh_params(params)))
			.await;

		obs::record_flow_outcome(
			KIND,
			if result.is_ok() { FlowOutcome::Success } else { FlowOutcome::Failure },
		);

		result
	}
}
