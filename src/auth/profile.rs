//! Normalized ARTIK Cloud user profile.

// self
use crate::_prelude::*;

/// Field injected into every normalized profile.
pub const ACCESS_TOKEN_FIELD: &str = "accessToken";

/// Provider `data` object augmented with the `accessToken` used to fetch it.
///
/// Fields other than `accessToken` pass through untouched; no shape guarantees are made
/// beyond the value being a JSON object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(JsonMap<String, JsonValue>);
impl Profile {
	/// Builds a profile from the provider `data` object, injecting `access_token`.
	pub fn from_data(mut data: JsonMap<String, JsonValue>, access_token: &str) -> Self {
		data.insert(ACCESS_TOKEN_FIELD.into(), JsonValue::String(access_token.to_owned()));

		Self(data)
	}

	/// Returns the provider user identifier, when present as a string.
	pub fn id(&self) -> Option<&str> {
		self.0.get("id").and_then(JsonValue::as_str)
	}

	/// Returns the access token injected during normalization.
	pub fn access_token(&self) -> Option<&str> {
		self.0.get(ACCESS_TOKEN_FIELD).and_then(JsonValue::as_str)
	}

	/// Looks up an arbitrary profile field.
	pub fn get(&self, field: &str) -> Option<&JsonValue> {
		self.0.get(field)
	}

	/// Converts the profile into a JSON value.
	pub fn into_value(self) -> JsonValue {
		JsonValue::Object(self.0)
	}
}

/// Envelope returned by the profile endpoint (`{"data": {...}}`).
#[derive(Debug, Deserialize)]
pub(crate) struct ProfileEnvelope {
	pub(crate) data: JsonMap<String, JsonValue>,
}
