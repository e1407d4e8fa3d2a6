#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use artikcloud_oauth2::{_preludet::*, error::TransportError};

const PROFILE_PATH: &str = "/v1.1/users/self";

#[tokio::test]
async fn user_profile_unwraps_data_and_injects_access_token() {
	let server = MockServer::start_async().await;
	let strategy = build_reqwest_test_strategy(test_config(&server.base_url()));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(PROFILE_PATH)
				.header("authorization", "Bearer profile-token");
			then.status(200).header("content-type", "application/json").body(
				"{\"data\":{\"id\":\"u1\",\"name\":\"ada\",\"fullName\":\"Ada Lovelace\",\"email\":\"ada@example.com\"}}",
			);
		})
		.await;
	let profile =
		strategy.user_profile("profile-token").await.expect("Profile fetch should succeed.");

	mock.assert_async().await;

	assert_eq!(profile.id(), Some("u1"));
	assert_eq!(profile.access_token(), Some("profile-token"));
	assert_eq!(profile.get("fullName").and_then(JsonValue::as_str), Some("Ada Lovelace"));
	assert_eq!(
		profile.into_value(),
		serde_json::json!({
			"id": "u1",
			"name": "ada",
			"fullName": "Ada Lovelace",
			"email": "ada@example.com",
			"accessToken": "profile-token",
		})
	);
}

#[tokio::test]
async fn user_profile_rejects_non_json_body() {
	let server = MockServer::start_async().await;
	let strategy = build_reqwest_test_strategy(test_config(&server.base_url()));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(PROFILE_PATH);
			then.status(200).body("<html>maintenance</html>");
		})
		.await;
	let err = strategy.user_profile("token").await.expect_err("HTML bodies should not parse.");

	mock.assert_async().await;

	assert!(matches!(err, Error::ProfileParse { .. }), "Unexpected error: {err:?}.");
	assert_eq!(err.to_string(), "Failed to parse user profile.");
}

#[tokio::test]
async fn user_profile_requires_data_object() {
	let server = MockServer::start_async().await;
	let strategy = build_reqwest_test_strategy(test_config(&server.base_url()));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(PROFILE_PATH);
			then.status(200).header("content-type", "application/json").body("{\"id\":\"u1\"}");
		})
		.await;
	let err = strategy.user_profile("token").await.expect_err("Missing `data` should fail.");

	mock.assert_async().await;

	assert!(matches!(err, Error::ProfileParse { .. }), "Unexpected error: {err:?}.");
}

#[tokio::test]
async fn user_profile_wraps_failed_status() {
	let server = MockServer::start_async().await;
	let strategy = build_reqwest_test_strategy(test_config(&server.base_url()));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(PROFILE_PATH);
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error\":{\"code\":401,\"message\":\"Please provide a valid authorization header\"}}");
		})
		.await;
	let err = strategy.user_profile("expired").await.expect_err("401 responses should fail.");

	mock.assert_async().await;

	assert_eq!(err.to_string(), "Failed to fetch user profile.");

	match err {
		Error::ProfileFetch { source } => assert!(
			matches!(*source, Error::Transport(TransportError::Status { status: 401, .. })),
			"Unexpected source: {source:?}."
		),
		other => panic!("Unexpected error variant: {other:?}."),
	}
}
