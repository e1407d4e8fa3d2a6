//! Classification of token endpoint error responses.

/// Canonical categories for token endpoint failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenErrorKind {
	/// Provider rejected the authorization grant (bad code/refresh token).
	InvalidGrant,
	/// Client authentication failed.
	InvalidClient,
	/// Requested scopes exceed what the client may obtain.
	InsufficientScope,
	/// Failure is temporary and should be retried.
	Transient,
}

/// Prefers the structured OAuth `error` field, then hints inside `error_description`, and
/// finally the HTTP status code.
pub(crate) fn classify_token_error(
	oauth_error: Option<&str>,
	error_description: Option<&str>,
	status: Option<u16>,
) -> TokenErrorKind {
	oauth_error
		.and_then(match_exact_value)
		.or_else(|| error_description.and_then(match_exact_value))
		.or_else(|| classify_text(error_description))
		.unwrap_or_else(|| classify_status(status))
}

fn match_exact_value(value: &str) -> Option<TokenErrorKind> {
	if value.eq_ignore_ascii_case("invalid_grant") || value.eq_ignore_ascii_case("access_denied") {
		Some(TokenErrorKind::InvalidGrant)
	} else if value.eq_ignore_ascii_case("invalid_client")
		|| value.eq_ignore_ascii_case("unauthorized_client")
	{
		Some(TokenErrorKind::InvalidClient)
	} else if value.eq_ignore_ascii_case("invalid_scope")
		|| value.eq_ignore_ascii_case("insufficient_scope")
	{
		Some(TokenErrorKind::InsufficientScope)
	} else if value.eq_ignore_ascii_case("temporarily_unavailable")
		|| value.eq_ignore_ascii_case("server_error")
	{
		Some(TokenErrorKind::Transient)
	} else {
		None
	}
}

fn classify_text(text: Option<&str>) -> Option<TokenErrorKind> {
	let lowered = text?.to_ascii_lowercase();

	match lowered.as_str() {
		text if text.contains("invalid_grant") => Some(TokenErrorKind::InvalidGrant),
		text if text.contains("invalid_client") => Some(TokenErrorKind::InvalidClient),
		text if text.contains("insufficient_scope") || text.contains("invalid_scope") =>
			Some(TokenErrorKind::InsufficientScope),
		text if text.contains("temporarily_unavailable") => Some(TokenErrorKind::Transient),
		_ => None,
	}
}

fn classify_status(status: Option<u16>) -> TokenErrorKind {
	match status {
		Some(400 | 404 | 410) => TokenErrorKind::InvalidGrant,
		Some(401) => TokenErrorKind::InvalidClient,
		Some(403) => TokenErrorKind::InsufficientScope,
		_ => TokenErrorKind::Transient,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn oauth_error_field_wins() {
		assert_eq!(
			classify_token_error(Some("invalid_client"), None, Some(400)),
			TokenErrorKind::InvalidClient
		);
		assert_eq!(
			classify_token_error(Some("invalid_grant"), None, Some(401)),
			TokenErrorKind::InvalidGrant
		);
	}

	#[test]
	fn description_then_status_fallbacks() {
		assert_eq!(
			classify_token_error(Some("custom"), Some("invalid_grant: code reused"), Some(500)),
			TokenErrorKind::InvalidGrant
		);
		assert_eq!(
			classify_token_error(Some("custom"), None, Some(403)),
			TokenErrorKind::InsufficientScope
		);
		assert_eq!(classify_token_error(None, None, Some(503)), TokenErrorKind::Transient);
		assert_eq!(classify_token_error(None, None, None), TokenErrorKind::Transient);
	}
}
