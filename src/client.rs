//! The platform client and the operations layered on it.
//!
//! [`Client`] owns the transport, configuration, active credential, and diagnostic slot.
//! Each submodule adds one group of operations: `authorize` (token lifecycle), `dispatch`
//! (authenticated request verbs), `subscription` (subscription lifecycle), and `account`
//! (account-scoped helpers).

mod account;
mod authorize;
mod dispatch;
mod subscription;

// self
use crate::{
	_prelude::*,
	auth::Credential,
	config::{ClientConfig, Endpoint},
	error::ConfigError,
	http::{ApiRequest, ApiResponse, DiagnosticSlot, Diagnostics, HttpTransport},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Token endpoint path.
pub const TOKEN_PATH: &str = "/restapi/oauth/token";
/// Subscription collection path.
pub const SUBSCRIPTION_PATH: &str = "/restapi/v1.0/subscription";

pub(crate) const NO_QUERY: &[(&str, &str)] = &[];

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestPlatformClient = Client<ReqwestHttpClient>;

/// Authenticated client for one application and account.
///
/// A client can be shared across tasks and threads. The credential sits behind a
/// read/write lock and is replaced as a whole by [`Client::authorize`]; concurrent
/// authorizations are serialized. The last request/response pair is recorded after every
/// exchange, successful or not, and can be read at any time through
/// [`Client::last_request`] and [`Client::last_response`]. Clones share the configuration,
/// credential, and diagnostic slot.
pub struct Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// HTTP transport used for every outbound request.
	pub transport: Arc<T>,
	config: Arc<RwLock<ClientConfig>>,
	credential: Arc<RwLock<Option<Credential>>>,
	diagnostics: DiagnosticSlot,
	authorize_guard: Arc<AsyncMutex<()>>,
}
impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a client that uses the caller-provided transport.
	pub fn with_transport(config: ClientConfig, transport: impl Into<Arc<T>>) -> Self {
		Self {
			transport: transport.into(),
			config: Arc::new(RwLock::new(config)),
			credential: Default::default(),
			diagnostics: Default::default(),
			authorize_guard: Default::default(),
		}
	}

	/// Returns a copy of the current configuration.
	pub fn config(&self) -> ClientConfig {
		self.config.read().clone()
	}

	/// Returns the target account id.
	pub fn account_id(&self) -> String {
		self.config.read().account_id.clone()
	}

	/// Switches between the sandbox and production endpoints.
	pub fn set_sandbox(&self, sandbox: bool) {
		self.config.write().endpoint = Endpoint::from_sandbox(sandbox);
	}

	/// Replaces the base endpoint.
	pub fn set_endpoint(&self, endpoint: Endpoint) -> Result<()> {
		if let Endpoint::Custom(url) = &endpoint {
			crate::config::builder::validate_endpoint(url).map_err(ConfigError::from)?;
		}

		self.config.write().endpoint = endpoint;

		Ok(())
	}

	/// Replaces the per-request timeout; zero restores the default.
	pub fn set_timeout(&self, timeout: StdDuration) {
		self.config.write().timeout =
			if timeout.is_zero() { crate::config::DEFAULT_TIMEOUT } else { timeout };
	}

	/// Returns a copy of the last request handed to the transport.
	pub fn last_request(&self) -> Option<ApiRequest> {
		self.diagnostics.last_request()
	}

	/// Returns a copy of the response to the last request; `None` after a transport failure.
	pub fn last_response(&self) -> Option<ApiResponse> {
		self.diagnostics.last_response()
	}

	/// Returns the last request/response pair as one consistent snapshot.
	pub fn last_exchange(&self) -> Diagnostics {
		self.diagnostics.snapshot()
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(config: ClientConfig) -> Self {
		Self::with_transport(config, ReqwestHttpClient::default())
	}
}
impl<T> Clone for Client<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			config: self.config.clone(),
			credential: self.credential.clone(),
			diagnostics: self.diagnostics.clone(),
			authorize_guard: self.authorize_guard.clone(),
		}
	}
}
impl<T> Debug for Client<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let config = self.config.read();

		f.debug_struct("Client")
			.field("endpoint", &config.endpoint)
			.field("app_id", &config.app_id)
			.field("account_id", &config.account_id)
			.field("authorized", &self.is_authorized())
			.finish()
	}
}

pub(crate) fn subscription_path(id: &str) -> String {
	format!("{SUBSCRIPTION_PATH}/{id}")
}
