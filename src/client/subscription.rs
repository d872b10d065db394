//! Subscription lifecycle: list, create, inspect, update, renew, and delete.

// crates.io
use http::Method;
// self
use crate::{
	_prelude::*,
	client::{Client, NO_QUERY, SUBSCRIPTION_PATH, subscription_path},
	http::HttpTransport,
	obs::{self, OperationKind},
	subscription::{
		CreateSubscriptionRequest, DeliveryMode, Subscription, SubscriptionList, SubscriptionRef,
	},
};

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists every subscription registered by the application.
	pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
		obs::observe(OperationKind::ListSubscriptions, "get", async move {
			let list: SubscriptionList = self.get_json(SUBSCRIPTION_PATH, NO_QUERY).await?;

			Ok(list.records)
		})
		.await
	}

	/// Registers a new subscription.
	///
	/// `expires_in` is clamped into `(0, 604800]`: zero, negative, and oversized values all
	/// request the maximum lifetime instead of failing.
	pub async fn create_subscription<I, S>(
		&self,
		event_filters: I,
		delivery_mode: DeliveryMode,
		expires_in: i64,
	) -> Result<Subscription>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let body = CreateSubscriptionRequest::new(event_filters, delivery_mode, expires_in);

		obs::observe(
			OperationKind::CreateSubscription,
			"post",
			self.post_json(SUBSCRIPTION_PATH, &body),
		)
		.await
	}

	/// Fetches a subscription by identifier or by a previously returned record.
	pub async fn subscription(&self, reference: impl Into<SubscriptionRef>) -> Result<Subscription> {
		let reference = reference.into();

		obs::observe(OperationKind::GetSubscription, "get", async move {
			let path = subscription_path(reference.resolve()?);

			self.get_json(&path, NO_QUERY).await
		})
		.await
	}

	/// Replaces a subscription with `subscription`.
	///
	/// `threshold` and `interval` tune notification batching; each is sent as a query
	/// parameter only when non-zero.
	pub async fn update_subscription(
		&self,
		subscription: &Subscription,
		threshold: u32,
		interval: u32,
	) -> Result<Subscription> {
		obs::observe(OperationKind::UpdateSubscription, "put", async move {
			let path = subscription_path(SubscriptionRef::from(subscription).resolve()?);
			let query = batching_query(threshold, interval);
			let request = self.prepare(Method::PUT, &path, &query)?.with_json_body(subscription)?;

			self.dispatch_json(request).await
		})
		.await
	}

	/// Deletes a subscription.
	pub async fn delete_subscription(&self, reference: impl Into<SubscriptionRef>) -> Result<()> {
		let reference = reference.into();

		obs::observe(OperationKind::DeleteSubscription, "delete", async move {
			let path = subscription_path(reference.resolve()?);

			self.delete(&path).await?;

			Ok(())
		})
		.await
	}

	/// Extends a subscription's expiration without changing its identifier or filters.
	pub async fn renew_subscription(
		&self,
		reference: impl Into<SubscriptionRef>,
	) -> Result<Subscription> {
		let reference = reference.into();

		obs::observe(OperationKind::RenewSubscription, "post", async move {
			let path = format!("{}/renew", subscription_path(reference.resolve()?));
			let request = self.prepare(Method::POST, &path, NO_QUERY)?;

			self.dispatch_json(request).await
		})
		.await
	}
}

fn batching_query(threshold: u32, interval: u32) -> Vec<(&'static str, String)> {
	let mut query = Vec::with_capacity(2);

	if threshold != 0 {
		query.push(("threshold", threshold.to_string()));
	}
	if interval != 0 {
		query.push(("interval", interval.to_string()));
	}

	query
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn batching_query_skips_zero_values() {
		assert!(batching_query(0, 0).is_empty());
		assert_eq!(batching_query(5, 0), vec![("threshold", "5".to_owned())]);
		assert_eq!(
			batching_query(5, 60),
			vec![("threshold", "5".to_owned()), ("interval", "60".to_owned())]
		);
		assert_eq!(batching_query(0, 60), vec![("interval", "60".to_owned())]);
	}
}
