//! Client configuration: endpoint selection, application credentials, account, and timeout.
//!
//! [`ClientConfig`] is assembled through [`ClientConfigBuilder`] and is immutable once a
//! client owns it, except for the endpoint mode and request timeout which the client
//! exposes setters for.

/// Builder API for assembling client configurations.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, auth::Secret, error::ConfigError};

/// Account id sentinel meaning "the account owning the authorized extension".
pub const CURRENT_ACCOUNT: &str = "~";
/// Request timeout applied when none (or a zero timeout) is configured.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(10);
/// User agent sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("ringcentral-client/", env!("CARGO_PKG_VERSION"));

/// Base endpoint every request path is joined against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Endpoint {
	#[default]
	/// Production platform.
	Production,
	/// Developer sandbox.
	Sandbox,
	/// Arbitrary base URL, e.g. a proxy or a mock server.
	Custom(Url),
}
impl Endpoint {
	/// Production platform base URL.
	pub const PRODUCTION_URL: &'static str = "https://platform.ringcentral.com";
	/// Sandbox platform base URL.
	pub const SANDBOX_URL: &'static str = "https://platform.devtest.ringcentral.com";

	/// Picks the production or sandbox endpoint.
	pub fn from_sandbox(sandbox: bool) -> Self {
		if sandbox { Self::Sandbox } else { Self::Production }
	}

	/// Returns the base URL as a string.
	pub fn base(&self) -> &str {
		match self {
			Self::Production => Self::PRODUCTION_URL,
			Self::Sandbox => Self::SANDBOX_URL,
			Self::Custom(url) => url.as_str(),
		}
	}

	/// Returns `true` for the sandbox endpoint.
	pub fn is_sandbox(&self) -> bool {
		matches!(self, Self::Sandbox)
	}

	/// Joins `path` to the base with exactly one `/` and appends `query` pairs.
	///
	/// Pairs are appended with `&` when `path` already carries a query string.
	pub fn join<K, V>(&self, path: &str, query: &[(K, V)]) -> Result<Url, ConfigError>
	where
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let raw = format!("{}/{}", self.base().trim_end_matches('/'), path.trim_start_matches('/'));
		let mut url = Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { source })?;

		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query);
		}

		Ok(url)
	}
}

/// Immutable client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Base endpoint requests are sent to.
	pub endpoint: Endpoint,
	/// Application (client) identifier, sent as the basic-auth user to the token endpoint.
	pub app_id: String,
	/// Application secret, sent as the basic-auth password to the token endpoint.
	pub app_secret: Secret,
	/// Target account identifier; [`CURRENT_ACCOUNT`] by default.
	pub account_id: String,
	/// Per-request timeout.
	pub timeout: StdDuration,
	/// `User-Agent` header value.
	pub user_agent: String,
}
impl ClientConfig {
	/// Creates a new builder for the provided application credentials.
	pub fn builder(app_id: impl Into<String>, app_secret: impl Into<String>) -> ClientConfigBuilder {
		ClientConfigBuilder::new(app_id, app_secret)
	}
}
