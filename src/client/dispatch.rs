//! Authenticated request dispatch.
//!
//! Every verb resolves its path against the active endpoint, attaches the `User-Agent`
//! header, selects authentication, performs exactly one exchange under the configured
//! timeout, records the exchange in the diagnostic slot, and maps the response:
//!
//! - transport failure → [`Error::Transport`]
//! - status ≥ 400 → [`Error::Api`], [`Error::ApiStatus`] (empty body), or [`Error::ApiBody`]
//! - status < 400 → the raw [`ApiResponse`], or the body decoded into the requested type
//!
//! Requests that fail authentication selection never reach the transport and leave the
//! diagnostic slot untouched.

// crates.io
use http::{Method, header::USER_AGENT};
// self
use crate::{
	_prelude::*,
	client::Client,
	error::{ApiError, TransportError},
	http::{ApiRequest, ApiResponse, HttpTransport},
	obs::{self, OperationKind},
};

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Sends a `GET` to `path` with `query` appended.
	pub async fn get<K, V>(&self, path: &str, query: &[(K, V)]) -> Result<ApiResponse>
	where
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let request = self.prepare(Method::GET, path, query)?;

		self.dispatch(request).await
	}

	/// Sends a `GET` and decodes the response body into `O`.
	pub async fn get_json<O, K, V>(&self, path: &str, query: &[(K, V)]) -> Result<O>
	where
		O: DeserializeOwned,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let request = self.prepare(Method::GET, path, query)?;

		self.dispatch_json(request).await
	}

	/// Sends a `POST` with `body` encoded as JSON.
	pub async fn post<I>(&self, path: &str, body: &I) -> Result<ApiResponse>
	where
		I: ?Sized + Serialize,
	{
		let request = self.prepare(Method::POST, path, super::NO_QUERY)?.with_json_body(body)?;

		self.dispatch(request).await
	}

	/// Sends a JSON `POST` and decodes the response body into `O`.
	pub async fn post_json<I, O>(&self, path: &str, body: &I) -> Result<O>
	where
		I: ?Sized + Serialize,
		O: DeserializeOwned,
	{
		let request = self.prepare(Method::POST, path, super::NO_QUERY)?.with_json_body(body)?;

		self.dispatch_json(request).await
	}

	/// Sends a `POST` with a form-encoded body.
	pub async fn post_form<K, V>(&self, path: &str, form: &[(K, V)]) -> Result<ApiResponse>
	where
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let request = self.prepare(Method::POST, path, super::NO_QUERY)?.with_form_body(form);

		self.dispatch(request).await
	}

	/// Sends a form-encoded `POST` and decodes the response body into `O`.
	pub async fn post_form_json<O, K, V>(&self, path: &str, form: &[(K, V)]) -> Result<O>
	where
		O: DeserializeOwned,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let request = self.prepare(Method::POST, path, super::NO_QUERY)?.with_form_body(form);

		self.dispatch_json(request).await
	}

	/// Sends a `PUT` with `body` encoded as JSON.
	pub async fn put<I>(&self, path: &str, body: &I) -> Result<ApiResponse>
	where
		I: ?Sized + Serialize,
	{
		let request = self.prepare(Method::PUT, path, super::NO_QUERY)?.with_json_body(body)?;

		self.dispatch(request).await
	}

	/// Sends a JSON `PUT` and decodes the response body into `O`.
	pub async fn put_json<I, O>(&self, path: &str, body: &I) -> Result<O>
	where
		I: ?Sized + Serialize,
		O: DeserializeOwned,
	{
		let request = self.prepare(Method::PUT, path, super::NO_QUERY)?.with_json_body(body)?;

		self.dispatch_json(request).await
	}

	/// Sends a `DELETE` to `path`.
	pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
		let request = self.prepare(Method::DELETE, path, super::NO_QUERY)?;

		self.dispatch(request).await
	}

	/// Builds an unauthenticated request for `path` against the active endpoint.
	pub(crate) fn prepare<K, V>(
		&self,
		method: Method,
		path: &str,
		query: &[(K, V)],
	) -> Result<ApiRequest>
	where
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let (url, user_agent) = {
			let config = self.config.read();

			(config.endpoint.join(path, query)?, config.user_agent.clone())
		};

		Ok(ApiRequest::new(method, url).with_header(USER_AGENT, &user_agent)?)
	}

	/// Dispatches `request` and decodes a successful body into `O`.
	pub(crate) async fn dispatch_json<O>(&self, request: ApiRequest) -> Result<O>
	where
		O: DeserializeOwned,
	{
		let response = self.dispatch(request).await?;

		Ok(response.json()?)
	}

	/// Authenticates, sends, records, and classifies one exchange.
	pub(crate) async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse> {
		let stage = method_label(&request.method);

		obs::observe(OperationKind::Dispatch, stage, async move {
			let request = self.authenticate(request)?;
			let outgoing = request.to_http()?;
			let timeout = self.config.read().timeout;
			let outcome = self.transport.execute(outgoing, timeout).await;
			let response = outcome.map(ApiResponse::from);

			obs::trace_exchange(
				stage,
				&request.url,
				response.as_ref().ok().map(|response| response.status.as_u16()),
			);
			self.diagnostics.record(request, response.as_ref().ok().cloned());

			classify(response.map_err(TransportError::network)?)
		})
		.await
	}

	/// Applies the authentication selection rules to `request`.
	fn authenticate(&self, request: ApiRequest) -> Result<ApiRequest> {
		if request.has_basic_auth() {
			return Ok(request);
		}

		let token = {
			let credential = self.credential.read();
			let credential = credential.as_ref().ok_or(Error::NotAuthenticated)?;

			if !credential.is_valid_at(OffsetDateTime::now_utc()) {
				return Err(Error::TokenExpired { expires_at: credential.expires_at });
			}

			credential.access_token.clone()
		};

		Ok(request.with_bearer(token.expose())?)
	}
}

/// Maps a received response to success or one of the API error variants.
fn classify(response: ApiResponse) -> Result<ApiResponse> {
	if !response.is_error() {
		return Ok(response);
	}

	let status = response.status_line();

	if response.body.is_empty() {
		return Err(Error::ApiStatus { status });
	}

	match serde_json::from_slice::<ApiError>(&response.body) {
		Ok(mut error) => {
			error.status = Some(response.status.as_u16());

			Err(Error::Api(error))
		},
		Err(_) => Err(Error::ApiBody { status, body: response.text().into_owned() }),
	}
}

fn method_label(method: &Method) -> &'static str {
	match *method {
		Method::GET => "GET",
		Method::POST => "POST",
		Method::PUT => "PUT",
		Method::DELETE => "DELETE",
		Method::PATCH => "PATCH",
		Method::HEAD => "HEAD",
		Method::OPTIONS => "OPTIONS",
		_ => "OTHER",
	}
}
