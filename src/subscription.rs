//! Subscription records, delivery modes, and the reference type accepted by lifecycle calls.
//!
//! A subscription is a server-side registration for push/webhook delivery of platform
//! events. It carries its own expiry, independent of the access credential, and must be
//! renewed before `expiration_time` to keep receiving notifications.

// self
use crate::_prelude::*;

/// Upper bound (and fallback) for a requested subscription lifetime, in seconds (7 days).
pub const MAX_EXPIRES_IN: i64 = 604_800;

/// Clamps a requested lifetime into `(0, MAX_EXPIRES_IN]`.
///
/// Out-of-range requests resolve to [`MAX_EXPIRES_IN`] instead of failing.
pub fn clamp_expires_in(requested: i64) -> i64 {
	if requested < 1 || requested > MAX_EXPIRES_IN { MAX_EXPIRES_IN } else { requested }
}

/// Server-reported subscription status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionStatus {
	/// Notifications are being delivered.
	Active,
	/// Delivery kept failing and the platform paused the subscription.
	Suspended,
}

/// Notification transport kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportType {
	/// Pub/sub channel the client long-polls.
	PubNub,
	/// HTTPS callback owned by the subscriber.
	WebHook,
}

/// How and where notifications are delivered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryMode {
	/// Transport kind.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub transport_type: Option<TransportType>,
	/// Requests encrypted payloads (pub/sub only).
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub encryption: bool,
	/// Webhook URL or pub/sub channel address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub address: Option<String>,
	/// Pub/sub subscriber key.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub subscriber_key: Option<String>,
	/// Payload encryption algorithm.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub encryption_algorithm: Option<String>,
	/// Payload encryption key.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub encryption_key: Option<String>,
	/// Mobile push registration id.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub registration_id: Option<String>,
	/// Mobile push certificate name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub certificate_name: Option<String>,
}
impl DeliveryMode {
	/// Webhook delivery to `address`.
	pub fn webhook(address: impl Into<String>) -> Self {
		Self {
			transport_type: Some(TransportType::WebHook),
			address: Some(address.into()),
			..Default::default()
		}
	}

	/// Pub/sub delivery, optionally encrypted.
	pub fn pubnub(encryption: bool) -> Self {
		Self { transport_type: Some(TransportType::PubNub), encryption, ..Default::default() }
	}
}

/// Subscription record as returned by the platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
	/// Server-assigned identifier.
	pub id: String,
	/// Canonical URI.
	#[serde(default)]
	pub uri: String,
	/// Event filters (topics), in server order.
	#[serde(default)]
	pub event_filters: Vec<String>,
	/// Absolute expiration instant.
	#[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub expiration_time: Option<OffsetDateTime>,
	/// Lifetime in seconds.
	#[serde(default)]
	pub expires_in: i64,
	/// Delivery status.
	pub status: SubscriptionStatus,
	/// Creation instant.
	#[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub creation_time: Option<OffsetDateTime>,
	/// Delivery configuration.
	#[serde(default)]
	pub delivery_mode: DeliveryMode,
}
impl Subscription {
	/// Returns `true` while the platform delivers notifications.
	pub fn is_active(&self) -> bool {
		matches!(self.status, SubscriptionStatus::Active)
	}

	/// Time left until `expiration_time` at `instant`; `None` when unknown.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Option<Duration> {
		self.expiration_time.map(|expiry| expiry - instant)
	}

	/// Returns `true` when the subscription should be renewed within `window` of `instant`.
	pub fn needs_renewal_at(&self, instant: OffsetDateTime, window: Duration) -> bool {
		self.remaining_at(instant).is_some_and(|remaining| remaining <= window)
	}
}

/// Body sent to create a subscription.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
	/// Event filters to subscribe to.
	pub event_filters: Vec<String>,
	/// Delivery configuration.
	pub delivery_mode: DeliveryMode,
	/// Requested lifetime in seconds, already clamped.
	pub expires_in: i64,
}
impl CreateSubscriptionRequest {
	/// Builds a request, clamping `expires_in` into `(0, MAX_EXPIRES_IN]`.
	pub fn new<I, S>(event_filters: I, delivery_mode: DeliveryMode, expires_in: i64) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			event_filters: event_filters.into_iter().map(Into::into).collect(),
			delivery_mode,
			expires_in: clamp_expires_in(expires_in),
		}
	}
}

/// Flat list returned by `GET /restapi/v1.0/subscription`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionList {
	/// Canonical URI of the collection.
	#[serde(default)]
	pub uri: String,
	/// Subscription records.
	#[serde(default)]
	pub records: Vec<Subscription>,
}

/// A subscription given either by identifier or by a previously returned record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubscriptionRef {
	/// Bare identifier.
	Id(String),
	/// Record whose `id` is used.
	Subscription(Box<Subscription>),
}
impl SubscriptionRef {
	/// Resolves the reference to an identifier usable as a path segment.
	pub fn resolve(&self) -> Result<&str> {
		let id = match self {
			Self::Id(id) => id.as_str(),
			Self::Subscription(subscription) => subscription.id.as_str(),
		};

		if id.is_empty() || id.chars().any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#')) {
			return Err(Error::InvalidSubscriptionReference { reference: id.to_owned() });
		}

		Ok(id)
	}
}
impl From<&str> for SubscriptionRef {
	fn from(value: &str) -> Self {
		Self::Id(value.to_owned())
	}
}
impl From<String> for SubscriptionRef {
	fn from(value: String) -> Self {
		Self::Id(value)
	}
}
impl From<&String> for SubscriptionRef {
	fn from(value: &String) -> Self {
		Self::Id(value.clone())
	}
}
impl From<Subscription> for SubscriptionRef {
	fn from(value: Subscription) -> Self {
		Self::Subscription(Box::new(value))
	}
}
impl From<&Subscription> for SubscriptionRef {
	fn from(value: &Subscription) -> Self {
		Self::Subscription(Box::new(value.clone()))
	}
}
