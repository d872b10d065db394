mod common;

// crates.io
use httpmock::prelude::*;
use serde::Deserialize;
// self
use common::*;
use ringcentral_client::{
	client::SUBSCRIPTION_PATH,
	config::DEFAULT_USER_AGENT,
	error::{Error, TransportError},
	subscription::SubscriptionList,
};

const NO_QUERY: &[(&str, &str)] = &[];

#[derive(Debug, Deserialize)]
struct Extension {
	id: i64,
	name: String,
}

#[tokio::test]
async fn bearer_and_user_agent_are_attached() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/restapi/v1.0/account/~/extension/~")
				.header("authorization", BEARER)
				.header("user-agent", DEFAULT_USER_AGENT);
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"id":101,"name":"Front Desk"}"#);
		})
		.await;
	let extension: Extension = client
		.get_json("/restapi/v1.0/account/~/extension/~", NO_QUERY)
		.await
		.expect("Authorized GET should succeed.");

	assert_eq!(extension.id, 101);
	assert_eq!(extension.name, "Front Desk");

	mock.assert_async().await;
}

#[tokio::test]
async fn query_pairs_are_encoded() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/restapi/v1.0/account/~/call-log")
				.query_param("dateFrom", "2025-01-01T00:00:00Z")
				.query_param("type", "Voice");
			then.status(200).body("{}");
		})
		.await;
	let query = [("dateFrom", "2025-01-01T00:00:00Z"), ("type", "Voice")];
	let response = client
		.get("/restapi/v1.0/account/~/call-log", &query)
		.await
		.expect("GET with query should succeed.");

	assert_eq!(response.status.as_u16(), 200);

	mock.assert_async().await;
}

#[tokio::test]
async fn structured_error_body_maps_to_api_error() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/restapi/v1.0/missing");
			then.status(404).header("content-type", "application/json").body(
				r#"{"errorCode":"CMN-101","message":"Resource not found","errors":[{"errorCode":"CMN-101","message":"Resource not found"}]}"#,
			);
		})
		.await;
	let err = client
		.get("/restapi/v1.0/missing", NO_QUERY)
		.await
		.expect_err("404 responses should fail.");

	match err {
		Error::Api(api) => {
			assert_eq!(api.error_code, "CMN-101");
			assert_eq!(api.message, "Resource not found");
			assert_eq!(api.errors.len(), 1);
			assert_eq!(api.status, Some(404));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	mock.assert_async().await;
}

#[tokio::test]
async fn empty_error_body_reports_status_line() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server);
	let _mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/restapi/v1.0/thing");
			then.status(500);
		})
		.await;
	let err = client.delete("/restapi/v1.0/thing").await.expect_err("500 responses should fail.");

	assert!(
		matches!(err, Error::ApiStatus { ref status } if status == "500 Internal Server Error"),
		"Unexpected error: {err:?}."
	);
}

#[tokio::test]
async fn unstructured_error_body_is_kept_verbatim() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server);
	let _mock = server
		.mock_async(|when, then| {
			when.method(PUT).path("/restapi/v1.0/thing");
			then.status(502).header("content-type", "text/html").body("<h1>Bad Gateway</h1>");
		})
		.await;
	let err = client
		.put("/restapi/v1.0/thing", &serde_json::json!({ "name": "x" }))
		.await
		.expect_err("502 responses should fail.");

	match err {
		Error::ApiBody { status, body } => {
			assert_eq!(status, "502 Bad Gateway");
			assert_eq!(body, "<h1>Bad Gateway</h1>");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn schema_mismatch_surfaces_decode_error_with_raw_body() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server);
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/restapi/v1.0/account/~/extension/~");
			then.status(200).body(r#"{"id":"not-a-number","name":"Front Desk"}"#);
		})
		.await;
	let err = client
		.get_json::<Extension, _, _>("/restapi/v1.0/account/~/extension/~", NO_QUERY)
		.await
		.expect_err("Schema drift should fail to decode.");

	match err {
		Error::Decode(decode) => {
			assert_eq!(decode.path(), "id");
			assert_eq!(decode.body(), r#"{"id":"not-a-number","name":"Front Desk"}"#);
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	let response = client.last_response().expect("Decoded response should be recorded.");

	assert_eq!(response.text(), r#"{"id":"not-a-number","name":"Front Desk"}"#);
}

#[tokio::test]
async fn diagnostics_record_the_last_exchange() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server);
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/restapi/v1.0/account/~/extension/~/sms");
			then.status(200).body(r#"{"id":"1"}"#);
		})
		.await;

	assert!(client.last_request().is_none());

	let response = client
		.post("/restapi/v1.0/account/~/extension/~/sms", &serde_json::json!({ "text": "hi" }))
		.await
		.expect("POST should succeed.");

	assert_eq!(response.text(), r#"{"id":"1"}"#);

	let exchange = client.last_exchange();
	let request = exchange.request.expect("Request should be recorded.");
	let recorded = exchange.response.expect("Response should be recorded.");

	assert_eq!(request.method.as_str(), "POST");
	assert_eq!(request.text(), r#"{"text":"hi"}"#);
	assert_eq!(request.header("content-type"), Some("application/json"));
	assert_eq!(recorded.text(), response.text());
	assert_eq!(recorded.text(), r#"{"id":"1"}"#);
}

#[tokio::test]
async fn transport_failure_still_records_the_request() {
	// Nothing listens on port 1.
	let client = client_for("http://127.0.0.1:1");

	client.set_credential(valid_credential());

	let err = client
		.get("/restapi/v1.0/account/~", NO_QUERY)
		.await
		.expect_err("Connection failures should surface.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })), "Unexpected: {err:?}.");

	let exchange = client.last_exchange();

	assert_eq!(
		exchange.request.map(|request| request.url.path().to_owned()),
		Some("/restapi/v1.0/account/~".into())
	);
	assert!(exchange.response.is_none());
}

#[tokio::test]
async fn slow_responses_hit_the_timeout() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server);
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/slow");
			then.status(200).delay(std::time::Duration::from_millis(800)).body("{}");
		})
		.await;

	client.set_timeout(std::time::Duration::from_millis(50));

	let err = client.get("/slow", NO_QUERY).await.expect_err("Timed out calls should fail.");

	assert!(matches!(err, Error::Transport(_)), "Unexpected error: {err:?}.");
	assert!(client.last_response().is_none());
}

#[tokio::test]
async fn form_posts_use_form_encoding() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/restapi/v1.0/account/~/extension/~/ring-out")
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200).body(r#"{"id":"r1"}"#);
		})
		.await;
	let body: serde_json::Value = client
		.post_form_json("/restapi/v1.0/account/~/extension/~/ring-out", &[("from", "+1 650")])
		.await
		.expect("Form POST should succeed.");

	assert_eq!(body["id"], "r1");
	assert_eq!(
		client.last_request().map(|request| request.text().into_owned()),
		Some("from=%2B1+650".into())
	);

	mock.assert_async().await;
}

#[tokio::test]
async fn trailing_bytes_after_the_json_value_fail_to_decode() {
	let transport =
		CountingTransport::answering(200, r#"{"uri":"x","records":[]} <html>oops</html>"#);
	let client = fake_client(transport.clone());

	client.set_credential(valid_credential());

	let err = client
		.get_json::<SubscriptionList, _, _>(SUBSCRIPTION_PATH, NO_QUERY)
		.await
		.expect_err("Trailing bytes should fail to decode.");

	match err {
		Error::Decode(decode) => {
			assert_eq!(decode.body(), r#"{"uri":"x","records":[]} <html>oops</html>"#);
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
	assert_eq!(transport.calls(), 1);
}
