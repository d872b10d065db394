//! Client-level error types shared by the dispatcher, token lifecycle, and subscription APIs.

// self
use crate::{_prelude::*, auth::CredentialBuilderError, config::ClientConfigError};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Nothing in the crate retries; every variant is surfaced to the immediate caller.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request construction problem; raised before any I/O.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Successful response whose body does not match the expected schema.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Structured error body returned with a 4xx/5xx status.
	#[error(transparent)]
	Api(#[from] ApiError),

	/// No credential has been obtained yet.
	#[error("Client is not authenticated; authorize before calling the platform.")]
	NotAuthenticated,
	/// The stored credential has lapsed.
	#[error("Access token expired at {expires_at}; authorize again to continue.")]
	TokenExpired {
		/// Absolute expiry of the lapsed credential.
		expires_at: OffsetDateTime,
	},
	/// A subscription reference cannot be resolved to an identifier.
	#[error("Subscription reference `{reference}` does not resolve to an identifier.")]
	InvalidSubscriptionReference {
		/// Offending reference value.
		reference: String,
	},
	/// Error status returned with an empty body.
	#[error("Platform returned {status} with an empty body.")]
	ApiStatus {
		/// HTTP status line, e.g. `503 Service Unavailable`.
		status: String,
	},
	/// Error status returned with a body that is not a structured error record.
	#[error("Platform returned {status}: {body}.")]
	ApiBody {
		/// HTTP status line.
		status: String,
		/// Raw response body.
		body: String,
	},
	/// The password grant failed.
	#[error("Authorization against the token endpoint failed.")]
	Authentication {
		/// Underlying dispatch or decode failure.
		#[source]
		source: Box<Error>,
	},
}
impl Error {
	/// Wraps a failure raised while authorizing.
	pub fn authentication(source: Error) -> Self {
		Self::Authentication { source: Box::new(source) }
	}

	/// Returns the structured API error, looking through [`Error::Authentication`].
	pub fn api_error(&self) -> Option<&ApiError> {
		match self {
			Self::Api(e) => Some(e),
			Self::Authentication { source } => source.api_error(),
			_ => None,
		}
	}
}

/// Configuration and request construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client configuration failed validation.
	#[error("Client configuration is invalid.")]
	InvalidConfig(#[from] ClientConfigError),
	/// Request URL could not be assembled from the endpoint and path.
	#[error("Request URL is invalid.")]
	InvalidUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request URL was rejected by the HTTP request model.
	#[error(transparent)]
	InvalidUri(#[from] http::uri::InvalidUri),
	/// Header value contains characters HTTP does not allow.
	#[error(transparent)]
	InvalidHeader(#[from] http::header::InvalidHeaderValue),
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	RequestBody {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Token endpoint payload could not be turned into a credential.
	#[error("Unable to build credential.")]
	CredentialBuild(#[from] CredentialBuilderError),
}

/// Transport-level failures (network, TLS, timeout).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the platform.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Response body that could not be decoded into the requested type.
///
/// The raw body is kept so schema drift between client and server can be diagnosed.
#[derive(Debug, ThisError)]
#[error("Response body does not match the expected schema at `{}`.", .source.path())]
pub struct DecodeError {
	/// Structured parsing failure, including the JSON path that failed.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
	/// Raw response body.
	pub body: String,
}
impl DecodeError {
	/// Returns the raw body that failed to decode.
	pub fn body(&self) -> &str {
		&self.body
	}

	/// Returns the JSON path at which decoding failed.
	pub fn path(&self) -> String {
		self.source.path().to_string()
	}
}

/// Structured error record returned by the platform with 4xx/5xx statuses.
///
/// Every field defaults, so any JSON object decodes; non-object bodies surface as
/// [`Error::ApiBody`] instead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ThisError)]
#[error("Platform API error `{error_code}`: {message}.")]
#[serde(default)]
pub struct ApiError {
	/// Platform error code, e.g. `CMN-101`.
	#[serde(rename = "errorCode")]
	pub error_code: String,
	/// Short OAuth-style code, e.g. `invalid_grant`.
	#[serde(rename = "error")]
	pub code: String,
	/// Human-readable message.
	pub message: String,
	/// Longer OAuth-style description.
	#[serde(rename = "error_description")]
	pub description: String,
	/// Nested sub-errors.
	pub errors: Vec<ApiError>,
	/// HTTP status the record arrived with; not part of the wire format.
	#[serde(skip)]
	pub status: Option<u16>,
}
