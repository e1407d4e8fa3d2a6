//! Application verify callback invoked after a successful code exchange.

// self
use crate::{
	_prelude::*,
	auth::{Profile, TokenSet},
};

/// Boxed future returned by [`Verify::verify`].
pub type VerifyFuture = Pin<Box<dyn Future<Output = Result<Verified>> + Send>>;

/// Inputs handed to the verify callback.
#[derive(Clone, Debug)]
pub struct VerifyContext {
	/// Tokens returned by the code exchange.
	pub tokens: TokenSet,
	/// Normalized profile; `None` when the profile fetch is skipped.
	pub profile: Option<Profile>,
}

/// Verdict returned by the verify callback.
#[derive(Clone, Debug, PartialEq)]
pub enum Verified {
	/// The application accepted the login.
	Success {
		/// User value forwarded to the host.
		user: JsonValue,
		/// Auxiliary information forwarded to the host.
		info: JsonValue,
	},
	/// The application rejected the login.
	Fail {
		/// Challenge message forwarded to the host.
		message: String,
	},
}
impl Verified {
	/// Accepts the login with `user` and no auxiliary information.
	pub fn success(user: impl Into<JsonValue>) -> Self {
		Self::Success { user: user.into(), info: JsonValue::Null }
	}

	/// Rejects the login with `message`.
	pub fn fail(message: impl Into<String>) -> Self {
		Self::Fail { message: message.into() }
	}
}

/// Maps provider tokens and profile to an application user.
///
/// Implemented for any `Fn(VerifyContext) -> impl Future<Output = Result<Verified>>`.
pub trait Verify: Send + Sync {
	/// Decides whether the login succeeds.
	fn verify(&self, ctx: VerifyContext) -> VerifyFuture;
}
impl<F, Fut> Verify for F
where
	F: Fn(VerifyContext) -> Fut + Send + Sync,
	Fut: 'static + Future<Output = Result<Verified>> + Send,
{
	fn verify(&self, ctx: VerifyContext) -> VerifyFuture {
		Box::pin(self(ctx))
	}
}
