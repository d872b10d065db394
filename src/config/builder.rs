// self
use crate::{
	_prelude::*,
	auth::Secret,
	config::{CURRENT_ACCOUNT, ClientConfig, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, Endpoint},
};

/// Errors raised while constructing or validating a configuration.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ClientConfigError {
	/// The application id is required for the token endpoint.
	#[error("Application id cannot be empty.")]
	MissingAppId,
	/// The account id cannot be blank; use `~` for the caller's own account.
	#[error("Account id cannot be empty.")]
	MissingAccountId,
	/// The account id must fit in one path segment.
	#[error("Account id `{account_id}` cannot be used as a path segment.")]
	InvalidAccountId {
		/// Offending account id.
		account_id: String,
	},
	/// Custom endpoints must be able to act as a base for request paths.
	#[error("The custom endpoint cannot be used as a base URL: {url}.")]
	InvalidEndpoint {
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// The user agent must be a valid header value.
	#[error("User agent contains characters not allowed in a header value.")]
	InvalidUserAgent,
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Base endpoint.
	pub endpoint: Endpoint,
	/// Application id.
	pub app_id: String,
	/// Application secret.
	pub app_secret: Secret,
	/// Target account id.
	pub account_id: String,
	/// Per-request timeout.
	pub timeout: StdDuration,
	/// `User-Agent` header value.
	pub user_agent: String,
}
impl ClientConfigBuilder {
	/// Creates a new builder seeded with production defaults.
	pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
		Self {
			endpoint: Endpoint::default(),
			app_id: app_id.into(),
			app_secret: Secret::new(app_secret),
			account_id: CURRENT_ACCOUNT.into(),
			timeout: DEFAULT_TIMEOUT,
			user_agent: DEFAULT_USER_AGENT.into(),
		}
	}

	/// Selects the sandbox (`true`) or production (`false`) endpoint.
	pub fn sandbox(mut self, sandbox: bool) -> Self {
		self.endpoint = Endpoint::from_sandbox(sandbox);

		self
	}

	/// Sets the base endpoint.
	pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
		self.endpoint = endpoint;

		self
	}

	/// Sets the target account id; an empty value falls back to `~`.
	pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
		let account_id = account_id.into();

		self.account_id = if account_id.is_empty() { CURRENT_ACCOUNT.into() } else { account_id };

		self
	}

	/// Sets the per-request timeout; zero falls back to the default.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = if timeout.is_zero() { DEFAULT_TIMEOUT } else { timeout };

		self
	}

	/// Overrides the `User-Agent` header value.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();

		self
	}

	/// Validates the builder and produces a [`ClientConfig`].
	pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
		self.validate()?;

		Ok(ClientConfig {
			endpoint: self.endpoint,
			app_id: self.app_id,
			app_secret: self.app_secret,
			account_id: self.account_id,
			timeout: self.timeout,
			user_agent: self.user_agent,
		})
	}

	fn validate(&self) -> Result<(), ClientConfigError> {
		if self.app_id.trim().is_empty() {
			return Err(ClientConfigError::MissingAppId);
		}
		if self.account_id.trim().is_empty() {
			return Err(ClientConfigError::MissingAccountId);
		}
		if self.account_id.chars().any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#')) {
			let account_id = self.account_id.clone();

			return Err(ClientConfigError::InvalidAccountId { account_id });
		}
		if let Endpoint::Custom(url) = &self.endpoint {
			validate_endpoint(url)?;
		}
		if http::HeaderValue::from_str(&self.user_agent).is_err() {
			return Err(ClientConfigError::InvalidUserAgent);
		}

		Ok(())
	}
}

pub(crate) fn validate_endpoint(url: &Url) -> Result<(), ClientConfigError> {
	if url.cannot_be_a_base() || url.query().is_some() || url.fragment().is_some() {
		return Err(ClientConfigError::InvalidEndpoint { url: url.to_string() });
	}

	Ok(())
}
