//! Default mode: authorization-code redirect and callback exchange.

// self
use crate::{
	_prelude::*,
	oauth::{AUTHORIZATION_CODE_GRANT, GRANT_TYPE, REDIRECT_URI, TokenParams},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	strategy::{
		ArtikCloudStrategy, AuthHost, AuthRequest, AuthenticateOptions, Verified, VerifyContext,
	},
};

impl ArtikCloudStrategy {
	pub(super) async fn authenticate_authorization_code(
		&self,
		request: &AuthRequest,
		options: &AuthenticateOptions,
		host: &mut dyn AuthHost,
	) {
		const KIND: FlowKind = FlowKind::AuthorizationCode;

		let span = FlowSpan::new(KIND, "authenticate");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		match span.instrument(self.run_authorization_code(request, options, &mut *host)).await {
			Ok(()) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(err) => {
				obs::record_flow_outcome(KIND, FlowOutcome::Failure);
				host.error(err);
			},
		}
	}

	async fn run_authorization_code(
		&self,
		request: &AuthRequest,
		options: &AuthenticateOptions,
		host: &mut dyn AuthHost,
	) -> Result<()> {
		if let Some(code) = request.query_param("error") {
			let description = request.query_param("error_description");

			if code == "access_denied" {
				host.fail(description.unwrap_or(code).to_owned(), None);

				return Ok(());
			}

			return Err(Error::Authorization {
				code: code.to_owned(),
				description: description.map(ToOwned::to_owned),
				uri: request.query_param("error_uri").map(ToOwned::to_owned),
			});
		}

		let Some(code) = request.query_param("code") else {
			let mut params = self.standard_params(request, options);

			params.insert("response_type".into(), "code".into());
			params.extend(self.authorization_params(options));
			host.redirect(self.client.authorize_url(&params));

			return Ok(());
		};
		let mut params = TokenParams::from([(GRANT_TYPE.into(), AUTHORIZATION_CODE_GRANT.into())]);

		if let Some(redirect) = self.config.resolve_callback(&request.url) {
			params.insert(REDIRECT_URI.into(), redirect.into());
		}

		let tokens = self.client.get_access_token(code, params).await?;
		let profile = if self.config.skip_user_profile {
			None
		} else {
			Some(self.user_profile(tokens.access_token.expose()).await?)
		};

		match self.verify.verify(VerifyContext { tokens, profile }).await? {
			Verified::Success { user, info } => host.success(user, info),
			Verified::Fail { message } => host.fail(message, None),
		}

		Ok(())
	}
}
