//! Transport primitives for platform exchanges.
//!
//! The module exposes [`HttpTransport`] alongside the buffered [`ApiRequest`] and
//! [`ApiResponse`] records and the [`DiagnosticSlot`] that keeps the most recent exchange.
//! Transports receive a fully built `http::Request<Vec<u8>>` and must return the whole
//! response body, so responses can be inspected and re-read any number of times.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use http::{
	HeaderMap, HeaderValue, Method, StatusCode, Version,
	header::{AUTHORIZATION, CONTENT_TYPE, HeaderName},
};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, DecodeError},
};

/// Request type handed to transports.
pub type HttpRequest = http::Request<Vec<u8>>;
/// Response type returned by transports.
pub type HttpResponse = http::Response<Vec<u8>>;
/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a, E> = Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// `Content-Type` for JSON request bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";
/// `Content-Type` for form-encoded request bodies.
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Abstraction over HTTP stacks able to perform one request/response exchange.
///
/// The trait is the client's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so a single transport can be shared by concurrent callers,
/// and must honor `timeout` for the whole exchange including the body read.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and buffers the full response.
	fn execute(
		&self,
		request: HttpRequest,
		timeout: StdDuration,
	) -> TransportFuture<'_, Self::TransportError>;
}

/// Buffered request record, as sent to the platform.
#[derive(Clone)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Fully resolved URL including query.
	pub url: Url,
	/// Request headers.
	pub headers: HeaderMap,
	/// Request body bytes.
	pub body: Vec<u8>,
}
impl ApiRequest {
	/// Creates a request without headers or body.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, headers: HeaderMap::new(), body: Vec::new() }
	}

	/// Sets a header, replacing any existing value.
	pub fn with_header(mut self, name: HeaderName, value: &str) -> Result<Self, ConfigError> {
		self.headers.insert(name, HeaderValue::from_str(value)?);

		Ok(self)
	}

	/// Serializes `body` as JSON and sets the JSON content type.
	pub fn with_json_body<I>(mut self, body: &I) -> Result<Self, ConfigError>
	where
		I: ?Sized + Serialize,
	{
		self.body =
			serde_json::to_vec(body).map_err(|source| ConfigError::RequestBody { source })?;
		self.headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));

		Ok(self)
	}

	/// Form-encodes `pairs` as the body and sets the form content type.
	pub fn with_form_body<K, V>(mut self, pairs: &[(K, V)]) -> Self
	where
		K: AsRef<str>,
		V: AsRef<str>,
	{
		self.body = url::form_urlencoded::Serializer::new(String::new())
			.extend_pairs(pairs)
			.finish()
			.into_bytes();
		self.headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_FORM));

		self
	}

	/// Sets HTTP basic-auth credentials.
	pub fn with_basic_auth(self, user: &str, password: &str) -> Result<Self, ConfigError> {
		let encoded = STANDARD.encode(format!("{user}:{password}"));

		self.with_header(AUTHORIZATION, &format!("Basic {encoded}"))
	}

	/// Sets a bearer `Authorization` header.
	pub fn with_bearer(self, token: &str) -> Result<Self, ConfigError> {
		self.with_header(AUTHORIZATION, &format!("Bearer {token}"))
	}

	/// Returns `true` when basic-auth credentials are already attached.
	pub fn has_basic_auth(&self) -> bool {
		self.header(AUTHORIZATION.as_str())
			.is_some_and(|value| value.len() > 6 && value[..6].eq_ignore_ascii_case("basic "))
	}

	/// Returns a header value as a string, if present and visible ASCII.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|value| value.to_str().ok())
	}

	/// Returns the body as (lossy) UTF-8 text.
	pub fn text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.body)
	}

	/// Builds the transport-level request.
	pub fn to_http(&self) -> Result<HttpRequest, ConfigError> {
		let mut request = HttpRequest::new(self.body.clone());

		*request.method_mut() = self.method.clone();
		*request.uri_mut() = self.url.as_str().parse()?;
		*request.headers_mut() = self.headers.clone();

		Ok(request)
	}
}
impl Debug for ApiRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiRequest")
			.field("method", &self.method)
			.field("url", &self.url.as_str())
			.field("headers", &RedactedHeaders(&self.headers))
			.field("body_len", &self.body.len())
			.finish()
	}
}

/// Buffered response record; the body stays readable after the client inspected it.
#[derive(Clone)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: StatusCode,
	/// HTTP version.
	pub version: Version,
	/// Response headers.
	pub headers: HeaderMap,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Returns the status line, e.g. `404 Not Found`.
	pub fn status_line(&self) -> String {
		match self.status.canonical_reason() {
			Some(reason) => format!("{} {reason}", self.status.as_u16()),
			None => self.status.as_u16().to_string(),
		}
	}

	/// Returns `true` for statuses at or above 400.
	pub fn is_error(&self) -> bool {
		self.status.as_u16() >= 400
	}

	/// Returns a header value as a string, if present and visible ASCII.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|value| value.to_str().ok())
	}

	/// Returns the body as (lossy) UTF-8 text.
	pub fn text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.body)
	}

	/// Decodes the body as JSON into `O`.
	pub fn json<O>(&self) -> Result<O, DecodeError>
	where
		O: DeserializeOwned,
	{
		decode_json(&self.body)
	}
}
impl From<HttpResponse> for ApiResponse {
	fn from(response: HttpResponse) -> Self {
		let (parts, body) = response.into_parts();

		Self { status: parts.status, version: parts.version, headers: parts.headers, body }
	}
}
impl Debug for ApiResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiResponse")
			.field("status", &self.status)
			.field("headers", &RedactedHeaders(&self.headers))
			.field("body_len", &self.body.len())
			.finish()
	}
}

struct RedactedHeaders<'a>(&'a HeaderMap);
impl Debug for RedactedHeaders<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_map()
			.entries(self.0.iter().map(|(name, value)| {
				let shown = if name == AUTHORIZATION {
					"<redacted>"
				} else {
					value.to_str().unwrap_or("<binary>")
				};

				(name.as_str(), shown)
			}))
			.finish()
	}
}

/// Decodes `body` as JSON into `O`, keeping the raw body on failure.
pub fn decode_json<O>(body: &[u8]) -> Result<O, DecodeError>
where
	O: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);
	let mut track = serde_path_to_error::Track::new();
	let decoded =
		O::deserialize(serde_path_to_error::Deserializer::new(&mut deserializer, &mut track))
			.and_then(|value| deserializer.end().map(|()| value));

	decoded.map_err(|source| DecodeError {
		source: serde_path_to_error::Error::new(track.path(), source),
		body: String::from_utf8_lossy(body).into_owned(),
	})
}

/// Last exchange observed by a client.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
	/// Last request handed to the transport.
	pub request: Option<ApiRequest>,
	/// Response to that request; `None` when the transport failed.
	pub response: Option<ApiResponse>,
}

/// Thread-safe slot holding the last request/response pair.
///
/// The pair is replaced as one unit under the lock, so readers never observe a request
/// from one exchange paired with the response of another.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticSlot(Arc<Mutex<Diagnostics>>);
impl DiagnosticSlot {
	/// Replaces the stored exchange.
	pub fn record(&self, request: ApiRequest, response: Option<ApiResponse>) {
		let exchange = Diagnostics { request: Some(request), response };

		*self.0.lock() = exchange;
	}

	/// Returns a copy of the stored exchange.
	pub fn snapshot(&self) -> Diagnostics {
		self.0.lock().clone()
	}

	/// Returns a copy of the last request, if any.
	pub fn last_request(&self) -> Option<ApiRequest> {
		self.0.lock().request.clone()
	}

	/// Returns a copy of the last response, if any.
	pub fn last_response(&self) -> Option<ApiResponse> {
		self.0.lock().response.clone()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(
		&self,
		request: HttpRequest,
		timeout: StdDuration,
	) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut request = reqwest::Request::try_from(request)?;

			*request.timeout_mut() = Some(timeout);

			let response = client.execute(request).await?;
			let status = response.status();
			let version = response.version();
			let headers = response.headers().to_owned();
			let mut response_new = HttpResponse::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.version_mut() = version;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
