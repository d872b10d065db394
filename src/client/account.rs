//! Account-scoped helpers that target the configured account id.

// self
use crate::{
	_prelude::*,
	account::{ActiveCallList, ExtensionList},
	client::Client,
	http::HttpTransport,
	obs::{self, OperationKind},
};

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists the extensions of the configured account.
	///
	/// `query` is passed through unchanged, e.g. `[("page", "2"), ("perPage", "100")]`.
	pub async fn extension_list<K, V>(&self, query: &[(K, V)]) -> Result<ExtensionList>
	where
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let path = format!("{}/extension", account_path(&self.account_id()));

		obs::observe(OperationKind::ExtensionList, "get", self.get_json(&path, query)).await
	}

	/// Lists calls in progress on `extension_id` within the configured account.
	pub async fn active_calls<K, V>(
		&self,
		extension_id: i64,
		query: &[(K, V)],
	) -> Result<ActiveCallList>
	where
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let path =
			format!("{}/extension/{extension_id}/active-calls", account_path(&self.account_id()));

		obs::observe(OperationKind::ActiveCalls, "get", self.get_json(&path, query)).await
	}
}

fn account_path(account_id: &str) -> String {
	format!("/restapi/v1.0/account/{account_id}")
}
