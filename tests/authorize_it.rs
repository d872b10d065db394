mod common;

// std
use std::time::Duration as StdDuration;
// crates.io
use httpmock::prelude::*;
// self
use common::*;
use ringcentral_client::{
	auth::CredentialBuilderError,
	client::TOKEN_PATH,
	error::{ConfigError, Error},
};

const NO_QUERY: &[(&str, &str)] = &[];

#[tokio::test]
async fn password_grant_stores_the_credential() {
	let server = MockServer::start_async().await;
	let client = anonymous_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.header("authorization", BASIC_AUTH)
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;

	assert!(!client.is_authorized());

	let before = time::OffsetDateTime::now_utc();
	let credential = client
		.authorize("+16505550100", "101", "p@ss word")
		.await
		.expect("Password grant should succeed.");

	assert_eq!(credential.access_token.expose(), ACCESS_TOKEN);
	assert_eq!(credential.owner_id, "1234567890");
	assert!(credential.expires_at >= before + time::Duration::seconds(3600));
	assert!(credential.expires_at <= time::OffsetDateTime::now_utc() + time::Duration::seconds(3600));
	assert!(client.is_authorized());
	assert!(!client.is_authorized_at(credential.expires_at));

	let request = client.last_request().expect("Token request should be recorded.");

	assert_eq!(
		request.text(),
		"grant_type=password&username=%2B16505550100&extension=101&password=p%40ss+word"
	);

	mock.assert_async().await;
}

#[tokio::test]
async fn authorized_requests_carry_the_new_token() {
	let server = MockServer::start_async().await;
	let client = anonymous_client(&server);
	let _token = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).body(TOKEN_BODY);
		})
		.await;
	let api = server
		.mock_async(|when, then| {
			when.method(GET).path("/restapi/v1.0/account/~").header("authorization", BEARER);
			then.status(200).body(r#"{"id":"~"}"#);
		})
		.await;

	client.authorize("+16505550100", "", "secret").await.expect("Password grant should succeed.");
	client.get("/restapi/v1.0/account/~", NO_QUERY).await.expect("Bearer request should succeed.");

	api.assert_async().await;
}

#[tokio::test]
async fn lapsed_credentials_fail_without_network_calls() {
	let server = MockServer::start_async().await;
	let client = anonymous_client(&server);
	let _token = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200)
				.body(r#"{"access_token":"short-lived","token_type":"bearer","expires_in":1}"#);
		})
		.await;
	let api = server
		.mock_async(|when, then| {
			when.method(GET).path("/restapi/v1.0/account/~");
			then.status(200).body("{}");
		})
		.await;
	let credential =
		client.authorize("+16505550100", "101", "secret").await.expect("Grant should succeed.");

	tokio::time::sleep(StdDuration::from_millis(1_100)).await;

	assert!(!client.is_authorized());

	let err = client
		.get("/restapi/v1.0/account/~", NO_QUERY)
		.await
		.expect_err("Expired credentials should be rejected locally.");

	assert!(
		matches!(err, Error::TokenExpired { expires_at } if expires_at == credential.expires_at),
		"Unexpected error: {err:?}."
	);

	api.assert_calls_async(0).await;
}

#[tokio::test]
async fn rejected_grant_keeps_the_previous_credential() {
	let server = MockServer::start_async().await;
	let client = anonymous_client(&server);
	let _token = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(400).header("content-type", "application/json").body(
				r#"{"error":"invalid_grant","errorCode":"OAU-140","error_description":"Invalid resource owner credentials"}"#,
			);
		})
		.await;

	client.set_credential(valid_credential());

	let err = client
		.authorize("+16505550100", "101", "wrong")
		.await
		.expect_err("Rejected grants should fail.");

	assert!(matches!(err, Error::Authentication { .. }), "Unexpected error: {err:?}.");

	let api = err.api_error().expect("The structured error should be reachable.");

	assert_eq!(api.code, "invalid_grant");
	assert_eq!(api.error_code, "OAU-140");
	assert_eq!(api.status, Some(400));
	assert_eq!(
		client.credential().map(|credential| credential.access_token.expose().to_owned()),
		Some(ACCESS_TOKEN.into())
	);
}

#[tokio::test]
async fn malformed_token_payload_is_an_authentication_failure() {
	let server = MockServer::start_async().await;
	let client = anonymous_client(&server);
	let _token = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).body(r#"{"token_type":"bearer"}"#);
		})
		.await;
	let err = client
		.authorize("+16505550100", "101", "secret")
		.await
		.expect_err("Payloads without a token should fail.");

	match err {
		Error::Authentication { source } => assert!(matches!(*source, Error::Decode(_))),
		other => panic!("Unexpected error variant: {other:?}."),
	}
	assert!(client.credential().is_none());
}

#[tokio::test]
async fn clearing_the_credential_requires_reauthorization() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server);

	assert!(client.is_authorized());
	assert!(client.clear_credential().is_some());

	let err = client
		.get("/restapi/v1.0/account/~", NO_QUERY)
		.await
		.expect_err("Cleared clients should be unauthenticated.");

	assert!(matches!(err, Error::NotAuthenticated));
	assert!(client.last_request().is_none());
}

#[tokio::test]
async fn out_of_range_lifetime_is_an_authentication_failure() {
	let server = MockServer::start_async().await;
	let client = anonymous_client(&server);
	let _token = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).body(
				r#"{"access_token":"a","token_type":"bearer","expires_in":9223372036854775807}"#,
			);
		})
		.await;
	let err = client
		.authorize("+16505550100", "101", "secret")
		.await
		.expect_err("Unrepresentable expiries should fail.");

	match err {
		Error::Authentication { source } => assert!(
			matches!(
				*source,
				Error::Config(ConfigError::CredentialBuild(
					CredentialBuilderError::ExpiryOutOfRange { .. }
				))
			),
			"Unexpected source: {source:?}."
		),
		other => panic!("Unexpected error variant: {other:?}."),
	}
	assert!(client.credential().is_none());
}
