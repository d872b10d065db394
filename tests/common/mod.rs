#![allow(dead_code)]

// std
use std::{
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration as StdDuration,
};
// crates.io
use httpmock::MockServer;
// self
use ringcentral_client::{
	auth::Credential,
	client::Client,
	config::{ClientConfig, Endpoint},
	http::{HttpRequest, HttpResponse, HttpTransport, ReqwestHttpClient, TransportFuture},
	url::Url,
};

pub const APP_ID: &str = "test-app";
pub const APP_SECRET: &str = "test-secret";
/// `base64("test-app:test-secret")`.
pub const BASIC_AUTH: &str = "Basic dGVzdC1hcHA6dGVzdC1zZWNyZXQ=";
pub const ACCESS_TOKEN: &str = "U1BCMDFUMDRKUzE";
pub const BEARER: &str = "Bearer U1BCMDFUMDRKUzE";
pub const TOKEN_BODY: &str = r#"{
	"access_token": "U1BCMDFUMDRKUzE",
	"token_type": "bearer",
	"expires_in": 3600,
	"refresh_token": "U1BCMDFUMDRKUzEy",
	"refresh_token_expires_in": 604800,
	"owner_id": "1234567890"
}"#;

pub type ReqwestTestClient = Client<ReqwestHttpClient>;

pub fn config_for(base_url: &str) -> ClientConfig {
	let endpoint =
		Endpoint::Custom(Url::parse(base_url).expect("Mock server base URL should parse."));

	ClientConfig::builder(APP_ID, APP_SECRET)
		.endpoint(endpoint)
		.build()
		.expect("Test client configuration should build.")
}

pub fn client_for(base_url: &str) -> ReqwestTestClient {
	let http = ringcentral_client::reqwest::Client::builder()
		.no_proxy()
		.build()
		.expect("Reqwest client should build.");

	Client::with_transport(config_for(base_url), ReqwestHttpClient::with_client(http))
}

/// Client pointed at `server` with no credential.
pub fn anonymous_client(server: &MockServer) -> ReqwestTestClient {
	client_for(&server.base_url())
}

/// Client pointed at `server` holding a credential valid for an hour.
pub fn authorized_client(server: &MockServer) -> ReqwestTestClient {
	let client = anonymous_client(server);

	client.set_credential(valid_credential());

	client
}

pub fn valid_credential() -> Credential {
	Credential::builder()
		.access_token(ACCESS_TOKEN)
		.expires_in(time::Duration::hours(1))
		.build()
		.expect("Valid credential fixture should build.")
}

pub fn expired_credential() -> Credential {
	let now = time::OffsetDateTime::now_utc();

	Credential::builder()
		.access_token(ACCESS_TOKEN)
		.issued_at(now - time::Duration::hours(2))
		.expires_at(now - time::Duration::hours(1))
		.build()
		.expect("Expired credential fixture should build.")
}

#[derive(Debug)]
pub struct RefusedError;
impl std::fmt::Display for RefusedError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.write_str("Connection refused.")
	}
}
impl std::error::Error for RefusedError {}

/// In-process transport that counts calls and answers with a fixed status and body.
#[derive(Clone, Default)]
pub struct CountingTransport {
	pub calls: Arc<AtomicUsize>,
	pub status: u16,
	pub body: &'static str,
	pub refuse: bool,
	pub echo: bool,
}
impl CountingTransport {
	pub fn answering(status: u16, body: &'static str) -> Self {
		Self { status, body, ..Default::default() }
	}

	/// Answers 200 with the request path as the body.
	pub fn echoing() -> Self {
		Self { status: 200, echo: true, ..Default::default() }
	}

	pub fn refusing() -> Self {
		Self { refuse: true, ..Default::default() }
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl HttpTransport for CountingTransport {
	type TransportError = RefusedError;

	fn execute(
		&self,
		request: HttpRequest,
		_timeout: StdDuration,
	) -> TransportFuture<'_, Self::TransportError> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let this = self.clone();
		let body = if self.echo { request.uri().path() } else { self.body }.as_bytes().to_vec();

		Box::pin(async move {
			if this.refuse {
				return Err(RefusedError);
			}

			let mut response = HttpResponse::new(body);

			*response.status_mut() =
				http::StatusCode::from_u16(this.status).expect("Fixture status should be valid.");

			Ok(response)
		})
	}
}

pub fn fake_client(transport: CountingTransport) -> Client<CountingTransport> {
	let config = ClientConfig::builder(APP_ID, APP_SECRET)
		.build()
		.expect("Test client configuration should build.");

	Client::with_transport(config, transport)
}
