//! Notification payloads delivered to subscribers.
//!
//! Every notification shares the [`EventNotification`] envelope; its `body` depends on the
//! event filter that matched. Payloads are decoded with the same contract as API responses:
//! a body that does not match the expected shape yields a [`DecodeError`] carrying the raw
//! text.

// self
use crate::{_prelude::*, account::Direction, error::DecodeError, http};

/// Envelope shared by all notifications.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventNotification<B> {
	/// Notification identifier; unique per delivery.
	#[serde(default)]
	pub uuid: String,
	/// Event filter that matched, e.g. `/restapi/v1.0/account/~/extension/~/presence`.
	pub event: String,
	/// Subscription that produced the notification.
	#[serde(default)]
	pub subscription_id: String,
	/// Instant the platform generated the notification.
	#[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub timestamp: Option<OffsetDateTime>,
	/// Event-specific payload.
	pub body: B,
}

/// Decodes a notification delivered to a webhook or pub/sub channel.
pub fn decode_event<B>(payload: &[u8]) -> Result<EventNotification<B>, DecodeError>
where
	B: DeserializeOwned,
{
	http::decode_json(payload)
}

/// Message store change counters for one message type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageStoreChange {
	/// Message type, e.g. `SMS`, `Fax`, or `VoiceMail`.
	#[serde(rename = "type")]
	pub kind: String,
	/// Messages modified since the last notification.
	pub updated_count: u32,
	/// Messages created since the last notification.
	pub new_count: u32,
}

/// Body of `message-store` notifications.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageStoreEvent {
	/// Extension owning the message store.
	pub extension_id: i64,
	/// Instant of the last change.
	#[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub last_updated: Option<OffsetDateTime>,
	/// Per-type counters.
	#[serde(default)]
	pub changes: Vec<MessageStoreChange>,
}

/// Party of an instant message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageParty {
	/// E.164 phone number.
	pub phone_number: String,
	/// Display name, when known.
	pub name: String,
	/// Geographic hint reported by the carrier.
	pub location: String,
}

/// Attachment of an instant message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Attachment {
	/// Identifier.
	pub id: String,
	/// Content URI.
	pub uri: String,
	/// Attachment kind, e.g. `Text` or `MmsAttachment`.
	#[serde(rename = "type")]
	pub kind: String,
	/// MIME type.
	pub content_type: String,
	/// Size in bytes.
	pub size: u64,
}

/// Body of `instant?type=SMS` notifications.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundMessageEvent {
	/// Message identifier.
	pub id: String,
	/// Recipients.
	#[serde(default)]
	pub to: Vec<MessageParty>,
	/// Sender.
	#[serde(default)]
	pub from: MessageParty,
	/// Message type.
	#[serde(rename = "type", default)]
	pub kind: String,
	/// Creation instant.
	#[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub creation_time: Option<OffsetDateTime>,
	/// Last modification instant.
	#[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub last_modified_time: Option<OffsetDateTime>,
	/// `Read` or `Unread`.
	#[serde(default)]
	pub read_status: String,
	/// `Normal` or `High`.
	#[serde(default)]
	pub priority: String,
	/// Attachments, including the text body.
	#[serde(default)]
	pub attachments: Vec<Attachment>,
	/// Direction relative to the extension.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub direction: Option<Direction>,
	/// `Alive`, `Deleted`, or `Purged`.
	#[serde(default)]
	pub availability: String,
	/// Message subject; the text for SMS.
	#[serde(default)]
	pub subject: String,
	/// Delivery status, e.g. `Received`.
	#[serde(default)]
	pub message_status: String,
	/// Conversation identifier.
	#[serde(default)]
	pub conversation_id: String,
}

/// Telephony state of an extension or call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TelephonyStatus {
	/// Idle.
	NoCall,
	/// A call is connected.
	CallConnected,
	/// A call is ringing.
	Ringing,
	/// A call is on hold.
	OnHold,
	/// A call is parked.
	ParkedCall,
}

/// Whether a presence notification is the final one for a state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminationType {
	/// Last notification for the change.
	Final,
	/// More notifications follow.
	Intermediate,
}

/// Aggregated or user-selected presence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresenceStatus {
	/// Not reachable.
	Offline,
	/// Reachable but occupied.
	Busy,
	/// Reachable and free.
	Available,
}

/// Do-not-disturb setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DndStatus {
	/// Accept every call.
	TakeAllCalls,
	/// Reject every call.
	DoNotAcceptAnyCalls,
	/// Reject calls routed through a call queue.
	#[serde(alias = "DoNotAcceptDeparmentCalls")]
	DoNotAcceptDepartmentCalls,
	/// Accept only calls routed through a call queue.
	TakeDepartmentCallsOnly,
}

/// Body of `presence` notifications.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PresenceEvent {
	/// Extension whose presence changed.
	pub extension_id: String,
	/// Telephony state.
	pub telephony_status: Option<TelephonyStatus>,
	/// Whether this is the last notification of the change.
	pub termination_type: Option<TerminationType>,
	/// Monotonic sequence number; out-of-order deliveries can be discarded.
	pub sequence: u64,
	/// Aggregated presence.
	pub presence_status: Option<PresenceStatus>,
	/// User-selected presence.
	pub user_status: Option<PresenceStatus>,
	/// Do-not-disturb setting.
	pub dnd_status: Option<DndStatus>,
	/// Other users may monitor this presence.
	pub allow_see_my_presence: bool,
	/// Ring when a monitored call arrives.
	pub ring_on_monitored_call: bool,
	/// Allow picking up monitored calls on hold.
	pub pick_up_calls_on_hold: bool,
}

/// Call listed in a detailed presence notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveCall {
	/// Call identifier.
	pub id: String,
	/// Direction relative to the extension.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub direction: Option<Direction>,
	/// Calling number.
	#[serde(default)]
	pub from: String,
	/// Called number.
	#[serde(default)]
	pub to: String,
	/// Telephony state of the call.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub telephony_status: Option<TelephonyStatus>,
	/// Telephony session identifier.
	#[serde(default)]
	pub session_id: String,
}

/// Body of `presence?detailedTelephonyState=true` notifications.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedPresenceEvent {
	/// Presence fields shared with [`PresenceEvent`].
	#[serde(flatten)]
	pub presence: PresenceEvent,
	/// Calls in progress.
	#[serde(default)]
	pub active_calls: Vec<ActiveCall>,
}
impl DetailedPresenceEvent {
	/// Returns the calls that are currently ringing.
	pub fn ringing_calls(&self) -> impl Iterator<Item = &ActiveCall> {
		self.active_calls
			.iter()
			.filter(|call| call.telephony_status == Some(TelephonyStatus::Ringing))
	}
}
