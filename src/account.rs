//! Account-scoped records: extensions, call log entries, and the paging envelope shared by
//! list endpoints.

// self
use crate::_prelude::*;

/// Link wrapper used by navigation records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationLink {
	/// Absolute URI of the linked page.
	#[serde(default)]
	pub uri: String,
}
impl NavigationLink {
	/// Parses the link, returning `None` when it is absent or malformed.
	pub fn url(&self) -> Option<Url> {
		if self.uri.is_empty() { None } else { Url::parse(&self.uri).ok() }
	}
}

/// Links to neighbouring pages of a list response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Navigation {
	/// First page.
	pub first_page: NavigationLink,
	/// Next page, when there is one.
	pub next_page: NavigationLink,
	/// Previous page, when there is one.
	pub previous_page: NavigationLink,
	/// Last page.
	pub last_page: NavigationLink,
}

/// Paging counters of a list response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Paging {
	/// Current page, starting at 1.
	pub page: u32,
	/// Records per page.
	pub per_page: u32,
	/// Index of the first record on this page.
	pub page_start: u32,
	/// Index of the last record on this page.
	pub page_end: u32,
	/// Total number of pages.
	pub total_pages: u32,
	/// Total number of records.
	pub total_elements: u32,
}
impl Paging {
	/// Returns `true` when more pages follow this one.
	pub fn has_next(&self) -> bool {
		self.page < self.total_pages
	}
}

/// Call direction relative to the extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
	/// Call placed to the extension.
	Inbound,
	/// Call placed by the extension.
	Outbound,
}

/// Media kind of a call log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallType {
	/// Voice call.
	Voice,
	/// Fax transmission.
	Fax,
}

/// Extension kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtensionType {
	/// Regular user extension.
	User,
	/// Fax-only user.
	FaxUser,
	/// User without a physical device.
	VirtualUser,
	/// Digital line user.
	DigitalUser,
	/// Call queue.
	Department,
	/// Announcement-only extension.
	Announcement,
	/// Voicemail-only extension.
	Voicemail,
	/// Shared lines group.
	SharedLinesGroup,
	/// Paging group.
	PagingOnly,
	/// Interactive voice menu.
	IvrMenu,
	/// Extension owned by an application.
	ApplicationExtension,
	/// Call park location.
	ParkLocation,
	/// Limited (common area) extension.
	Limited,
}

/// Extension provisioning status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtensionStatus {
	/// Extension is in service.
	Enabled,
	/// Extension was disabled by an administrator.
	Disabled,
	/// Extension exists but was never activated.
	NotActivated,
	/// Extension number has no owner.
	Unassigned,
}

/// Contact details of an extension owner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactInfo {
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
	/// Company name.
	pub company: String,
	/// Email address.
	pub email: String,
	/// Business phone number.
	pub business_phone: String,
}

/// Extension record from `GET /restapi/v1.0/account/{accountId}/extension`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionInfo {
	/// Internal extension identifier.
	pub id: i64,
	/// Canonical URI.
	#[serde(default)]
	pub uri: String,
	/// Short dialing number.
	#[serde(default)]
	pub extension_number: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Extension kind.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<ExtensionType>,
	/// Provisioning status.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<ExtensionStatus>,
	/// Owner contact details.
	#[serde(default)]
	pub contact: ContactInfo,
}

/// Page of extensions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionList {
	/// Canonical URI of this page.
	pub uri: String,
	/// Extension records.
	pub records: Vec<ExtensionInfo>,
	/// Neighbouring page links.
	pub navigation: Navigation,
	/// Paging counters.
	pub paging: Paging,
}

/// Device a call party used.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceInfo {
	/// Identifier.
	pub id: String,
	/// Canonical URI.
	pub uri: String,
}

/// One side of a call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallerInfo {
	/// E.164 phone number.
	pub phone_number: String,
	/// Short extension number, for internal parties.
	pub extension_number: String,
	/// Geographic hint reported by the carrier.
	pub location: String,
	/// Caller id name.
	pub name: String,
	/// Device used by the party.
	pub device: DeviceInfo,
}

/// Recording attached to a call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingInfo {
	/// Identifier.
	pub id: String,
	/// Canonical URI.
	pub uri: String,
	/// `Automatic` or `OnDemand`.
	#[serde(rename = "type")]
	pub kind: String,
}

/// Call log or active call entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallLogRecord {
	/// Record identifier.
	pub id: String,
	/// Canonical URI.
	#[serde(default)]
	pub uri: String,
	/// Telephony session identifier.
	#[serde(default)]
	pub session_id: String,
	/// Calling party.
	#[serde(default)]
	pub from: CallerInfo,
	/// Called party.
	#[serde(default)]
	pub to: CallerInfo,
	/// Media kind.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<CallType>,
	/// Direction relative to the extension.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub direction: Option<Direction>,
	/// Action that initiated the call, e.g. `Phone Call` or `RingOut Web`.
	#[serde(default)]
	pub action: String,
	/// Call result, e.g. `In Progress`, `Missed`, or `Call connected`.
	#[serde(default)]
	pub result: String,
	/// Call start instant.
	#[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub start_time: Option<OffsetDateTime>,
	/// Duration in seconds.
	#[serde(default)]
	pub duration: i64,
	/// Recording, when the call was recorded.
	#[serde(default, alias = "recordingInfo", skip_serializing_if = "Option::is_none")]
	pub recording: Option<RecordingInfo>,
}
impl CallLogRecord {
	/// Returns the call length as a [`Duration`].
	pub fn length(&self) -> Duration {
		Duration::seconds(self.duration)
	}
}

/// Page of calls in progress on an extension.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveCallList {
	/// Canonical URI of this page.
	pub uri: String,
	/// Active call records.
	pub records: Vec<CallLogRecord>,
	/// Neighbouring page links.
	pub navigation: Navigation,
	/// Paging counters.
	pub paging: Paging,
}
