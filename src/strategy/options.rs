//! Per-request authentication options.

// self
use crate::_prelude::*;

/// Authentication mode selected per request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
	/// Standard authorization-code redirect and callback exchange.
	#[default]
	AuthorizationCode,
	/// Implicit grant; the provider returns the token in a fragment redirect.
	Implicit,
	/// Service-to-service client credentials grant.
	ClientCredentials,
}
impl AuthType {
	/// Returns the option value used on the wire and in config files.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthType::AuthorizationCode => "authorization_code",
			AuthType::Implicit => "implicit",
			AuthType::ClientCredentials => "client_credentials",
		}
	}
}
impl Display for AuthType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for AuthType {
	type Err = UnknownOption;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"" | "authorization_code" => Ok(AuthType::AuthorizationCode),
			"implicit" => Ok(AuthType::Implicit),
			"client_credentials" => Ok(AuthType::ClientCredentials),
			other => Err(UnknownOption { option: "authType", value: other.to_owned() }),
		}
	}
}

/// Dialog rendering hint forwarded as the `display` authorization parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
	/// Full page.
	Page,
	/// Popup window.
	Popup,
	/// Touch-optimized page.
	Touch,
}
impl DisplayMode {
	/// Returns the parameter value sent to the authorization endpoint.
	pub const fn as_str(self) -> &'static str {
		match self {
			DisplayMode::Page => "page",
			DisplayMode::Popup => "popup",
			DisplayMode::Touch => "touch",
		}
	}
}
impl Display for DisplayMode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for DisplayMode {
	type Err = UnknownOption;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"page" => Ok(DisplayMode::Page),
			"popup" => Ok(DisplayMode::Popup),
			"touch" => Ok(DisplayMode::Touch),
			other => Err(UnknownOption { option: "display", value: other.to_owned() }),
		}
	}
}

/// Error returned when an option string is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown {option} value `{value}`.")]
pub struct UnknownOption {
	/// Option name.
	pub option: &'static str,
	/// Rejected value.
	pub value: String,
}

/// Options supplied by the host for a single `authenticate` call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthenticateOptions {
	/// Authentication mode; defaults to the authorization-code flow.
	pub auth_type: AuthType,
	/// Dialog rendering hint (implicit mode only).
	pub display: Option<DisplayMode>,
	/// Scope override for authorization redirects.
	pub scope: Option<Vec<String>>,
}
impl AuthenticateOptions {
	/// Options selecting the implicit mode.
	pub fn implicit() -> Self {
		Self { auth_type: AuthType::Implicit, ..Default::default() }
	}

	/// Options selecting the client credentials mode.
	pub fn client_credentials() -> Self {
		Self { auth_type: AuthType::ClientCredentials, ..Default::default() }
	}

	/// Sets the display hint.
	pub fn with_display(mut self, display: DisplayMode) -> Self {
		self.display = Some(display);

		self
	}

	/// Overrides the requested scopes.
	pub fn with_scope<I, S>(mut self, scope: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scope = Some(scope.into_iter().map(Into::into).collect());

		self
	}
}
