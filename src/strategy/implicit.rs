// self
use crate::{
	obs::{self, FlowKind, FlowOutcome},
	strategy::{ArtikCloudStrategy, AuthHost, AuthenticateOptions},
};

impl ArtikCloudStrategy {
	/// Redirects to the authorization endpoint; the provider hands the token back to the
	/// user agent in a fragment, so no exchange happens here.
	///
	/// Only `client_id` and the authorization params are sent; the provider redirects to the
	/// callback registered for the client.
	pub(super) fn authenticate_implicit(
		&self,
		options: &AuthenticateOptions,
		host: &mut dyn AuthHost,
	) {
		obs::record_flow_outcome(FlowKind::Implicit, FlowOutcome::Attempt);

		host.redirect(self.client.authorize_url(&self.authorization_params(options)));

		obs::record_flow_outcome(FlowKind::Implicit, FlowOutcome::Success);
	}
}
