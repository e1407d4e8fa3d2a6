//! Host framework seam: the primitives a strategy uses to report its outcome.

// self
use crate::_prelude::*;

/// Authentication host that receives the strategy's signals for one request.
///
/// A strategy may emit more than one signal per request (the client credentials mode
/// reports `success` followed by `pass`), so hosts must accept signal sequences.
pub trait AuthHost: Send {
	/// Redirects the user agent to `url`.
	fn redirect(&mut self, url: Url);

	/// Authentication succeeded with `user` and auxiliary `info`.
	fn success(&mut self, user: JsonValue, info: JsonValue);

	/// Authentication failed with a challenge message and optional HTTP status.
	fn fail(&mut self, challenge: String, status: Option<u16>);

	/// An error occurred while authenticating.
	fn error(&mut self, err: Error);

	/// Hands the request to the next handler without authenticating.
	fn pass(&mut self);
}

/// Signal emitted through [`AuthHost`].
#[derive(Debug)]
pub enum Signal {
	/// [`AuthHost::redirect`].
	Redirect(Url),
	/// [`AuthHost::success`].
	Success {
		/// Authenticated user.
		user: JsonValue,
		/// Auxiliary information.
		info: JsonValue,
	},
	/// [`AuthHost::fail`].
	Fail {
		/// Challenge message.
		challenge: String,
		/// Optional HTTP status.
		status: Option<u16>,
	},
	/// [`AuthHost::error`].
	Error(Error),
	/// [`AuthHost::pass`].
	Pass,
}

/// [`AuthHost`] that records every signal in order.
#[derive(Debug, Default)]
pub struct SignalLog(Vec<Signal>);
impl SignalLog {
	/// Recorded signals, oldest first.
	pub fn signals(&self) -> &[Signal] {
		&self.0
	}

	/// Consumes the log and returns the recorded signals.
	pub fn into_signals(self) -> Vec<Signal> {
		self.0
	}
}
impl AuthHost for SignalLog {
	fn redirect(&mut self, url: Url) {
		self.0.push(Signal::Redirect(url));
	}

	fn success(&mut self, user: JsonValue, info: JsonValue) {
		self.0.push(Signal::Success { user, info });
	}

	fn fail(&mut self, challenge: String, status: Option<u16>) {
		self.0.push(Signal::Fail { challenge, status });
	}

	fn error(&mut self, err: Error) {
		self.0.push(Signal::Error(err));
	}

	fn pass(&mut self) {
		self.0.push(Signal::Pass);
	}
}
