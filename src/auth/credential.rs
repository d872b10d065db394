//! OAuth2 bearer credential issued by the password grant, its lifecycle helpers, and builder.

// self
use crate::{_prelude::*, auth::Secret};

/// Current lifecycle status for a credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialStatus {
	/// The absolute expiry lies strictly in the future.
	Active,
	/// The absolute expiry has been reached.
	Expired,
}

/// Errors produced by [`CredentialBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CredentialBuilderError {
	/// Issued when no access token value was provided.
	#[error("Access token is required.")]
	MissingAccessToken,
	/// Issued when no expiry (absolute or relative) was configured.
	#[error("Expiry must be supplied via expires_at or expires_in.")]
	MissingExpiry,
	/// Issued when the relative expiry lands outside the representable date range.
	#[error("Expiry of {seconds} seconds after issuance is out of range.")]
	ExpiryOutOfRange {
		/// Offending lifetime in whole seconds.
		seconds: i64,
	},
}

/// JSON body returned by `POST /restapi/oauth/token`.
#[derive(Clone, Deserialize)]
pub struct TokenPayload {
	/// Bearer access token.
	pub access_token: String,
	/// Token type, normally `bearer`.
	#[serde(default)]
	pub token_type: String,
	/// Access token lifetime in seconds, relative to issuance.
	pub expires_in: i64,
	/// Refresh token, when issued.
	#[serde(default)]
	pub refresh_token: Option<String>,
	/// Refresh token lifetime in seconds, relative to issuance.
	#[serde(default)]
	pub refresh_token_expires_in: Option<i64>,
	/// Extension identifier owning the token.
	#[serde(default)]
	pub owner_id: String,
}
impl Debug for TokenPayload {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenPayload")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("expires_in", &self.expires_in)
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("refresh_token_expires_in", &self.refresh_token_expires_in)
			.field("owner_id", &self.owner_id)
			.finish()
	}
}

/// Bearer credential held by a client.
///
/// `expires_at` is derived from `issued_at + expires_in` whenever a credential is obtained.
/// The refresh token is kept for callers that persist it; the client never consumes it.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
	/// Access token secret; callers must avoid logging it.
	pub access_token: Secret,
	/// Token type reported by the token endpoint.
	pub token_type: String,
	/// Access token lifetime in seconds as reported by the token endpoint.
	pub expires_in: i64,
	/// Refresh token secret, if the platform issued one.
	pub refresh_token: Option<Secret>,
	/// Refresh token lifetime in seconds as reported by the token endpoint.
	pub refresh_token_expires_in: Option<i64>,
	/// Extension identifier owning the token.
	pub owner_id: String,
	/// Instant the credential was obtained.
	pub issued_at: OffsetDateTime,
	/// Absolute expiry of the access token.
	pub expires_at: OffsetDateTime,
}
impl Credential {
	/// Returns a builder for constructing credentials.
	pub fn builder() -> CredentialBuilder {
		CredentialBuilder::default()
	}

	/// Converts a token endpoint payload into a credential issued at `issued_at`.
	pub fn from_payload(
		payload: TokenPayload,
		issued_at: OffsetDateTime,
	) -> Result<Self, CredentialBuilderError> {
		let mut builder = Self::builder()
			.access_token(payload.access_token)
			.token_type(payload.token_type)
			.owner_id(payload.owner_id)
			.issued_at(issued_at)
			.expires_in(Duration::seconds(payload.expires_in));

		if let Some(refresh) = payload.refresh_token {
			builder = builder.refresh_token(refresh, payload.refresh_token_expires_in);
		}

		builder.build()
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> CredentialStatus {
		if instant < self.expires_at { CredentialStatus::Active } else { CredentialStatus::Expired }
	}

	/// Convenience helper that checks the status using the current UTC instant.
	pub fn status(&self) -> CredentialStatus {
		self.status_at(OffsetDateTime::now_utc())
	}

	/// Returns `true` if the credential is usable at the provided instant.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), CredentialStatus::Active)
	}

	/// Returns `true` if the credential is usable now.
	pub fn is_valid(&self) -> bool {
		matches!(self.status(), CredentialStatus::Active)
	}

	/// Absolute expiry of the refresh token, when one was issued with a lifetime.
	pub fn refresh_expires_at(&self) -> Option<OffsetDateTime> {
		self.refresh_token_expires_in
			.and_then(|secs| self.issued_at.checked_add(Duration::seconds(secs)))
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credential")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("owner_id", &self.owner_id)
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

/// Builder for [`Credential`].
#[derive(Clone, Debug, Default)]
pub struct CredentialBuilder {
	access_token: Option<Secret>,
	token_type: Option<String>,
	refresh_token: Option<Secret>,
	refresh_token_expires_in: Option<i64>,
	owner_id: Option<String>,
	issued_at: Option<OffsetDateTime>,
	expires_at: Option<OffsetDateTime>,
	expires_in: Option<Duration>,
}
impl CredentialBuilder {
	/// Provides the access token value.
	pub fn access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = Some(Secret::new(token));

		self
	}

	/// Sets the token type (defaults to `bearer`).
	pub fn token_type(mut self, token_type: impl Into<String>) -> Self {
		self.token_type = Some(token_type.into());

		self
	}

	/// Provides the refresh token value and its relative lifetime in seconds.
	pub fn refresh_token(mut self, token: impl Into<String>, expires_in: Option<i64>) -> Self {
		self.refresh_token = Some(Secret::new(token));
		self.refresh_token_expires_in = expires_in;

		self
	}

	/// Sets the owning extension identifier.
	pub fn owner_id(mut self, owner_id: impl Into<String>) -> Self {
		self.owner_id = Some(owner_id.into());

		self
	}

	/// Sets the issued-at instant.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Sets an absolute expiry instant.
	pub fn expires_at(mut self, instant: OffsetDateTime) -> Self {
		self.expires_at = Some(instant);

		self
	}

	/// Sets a relative expiry duration from the issued instant.
	pub fn expires_in(mut self, duration: Duration) -> Self {
		self.expires_in = Some(duration);

		self
	}

	/// Consumes the builder and produces a [`Credential`].
	pub fn build(self) -> Result<Credential, CredentialBuilderError> {
		let access_token = self.access_token.ok_or(CredentialBuilderError::MissingAccessToken)?;
		let issued_at = self.issued_at.unwrap_or_else(OffsetDateTime::now_utc);
		let expires_at = match (self.expires_at, self.expires_in) {
			(Some(instant), _) => instant,
			(None, Some(delta)) => issued_at.checked_add(delta).ok_or(
				CredentialBuilderError::ExpiryOutOfRange { seconds: delta.whole_seconds() },
			)?,
			(None, None) => return Err(CredentialBuilderError::MissingExpiry),
		};

		Ok(Credential {
			access_token,
			token_type: self.token_type.unwrap_or_else(|| "bearer".into()),
			expires_in: (expires_at - issued_at).whole_seconds(),
			refresh_token: self.refresh_token,
			refresh_token_expires_in: self.refresh_token_expires_in,
			owner_id: self.owner_id.unwrap_or_default(),
			issued_at,
			expires_at,
		})
	}
}
