//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `ringcentral_client.operation` with the
//!   `operation` and `stage` fields, plus a debug event for every completed exchange.
//! - Enable `metrics` to increment the `ringcentral_client_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Client operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Password grant against the token endpoint.
	Authorize,
	/// A single dispatcher exchange.
	Dispatch,
	/// Subscription listing.
	ListSubscriptions,
	/// Subscription creation.
	CreateSubscription,
	/// Subscription lookup.
	GetSubscription,
	/// Subscription update.
	UpdateSubscription,
	/// Subscription deletion.
	DeleteSubscription,
	/// Subscription renewal.
	RenewSubscription,
	/// Account extension listing.
	ExtensionList,
	/// Active call listing.
	ActiveCalls,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::Authorize => "authorize",
			OperationKind::Dispatch => "dispatch",
			OperationKind::ListSubscriptions => "list_subscriptions",
			OperationKind::CreateSubscription => "create_subscription",
			OperationKind::GetSubscription => "get_subscription",
			OperationKind::UpdateSubscription => "update_subscription",
			OperationKind::DeleteSubscription => "delete_subscription",
			OperationKind::RenewSubscription => "renew_subscription",
			OperationKind::ExtensionList => "extension_list",
			OperationKind::ActiveCalls => "active_calls",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside an operation span and records attempt + outcome.
pub(crate) async fn observe<Fut, T>(kind: OperationKind, stage: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = OperationSpan::new(kind, stage);

	record_operation_outcome(kind, OperationOutcome::Attempt);

	let result = span.instrument(fut).await;

	match &result {
		Ok(_) => record_operation_outcome(kind, OperationOutcome::Success),
		Err(_) => record_operation_outcome(kind, OperationOutcome::Failure),
	}

	result
}
