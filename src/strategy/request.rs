//! Incoming request view: the original URL and its query mapping.

// self
use crate::_prelude::*;

/// Incoming request as seen by the strategy: the original URL and its query mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthRequest {
	/// Parsed original request URL.
	pub url: Url,
	/// Query parameters; the last value wins for repeated keys.
	pub query: BTreeMap<String, String>,
}
impl AuthRequest {
	/// Builds a request whose query mapping is parsed from `url`.
	pub fn new(url: Url) -> Self {
		let query = url.query_pairs().into_owned().collect();

		Self { url, query }
	}

	/// Path component of the request URL.
	pub fn path(&self) -> &str {
		self.url.path()
	}

	/// Looks up a query parameter.
	pub fn query_param(&self, key: &str) -> Option<&str> {
		self.query.get(key).map(String::as_str)
	}
}
impl FromStr for AuthRequest {
	type Err = url::ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Url::parse(s).map(Self::new)
	}
}
