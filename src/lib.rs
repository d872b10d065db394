//! Authenticated REST dispatch for the RingCentral platform, with a password-grant token
//! lifecycle and a webhook/push subscription manager built on top of it.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod account;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod http;
pub mod obs;
pub mod subscription;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::Client,
		config::{ClientConfig, Endpoint},
		http::ReqwestHttpClient,
	};

	/// Application id used by test clients.
	pub const TEST_APP_ID: &str = "test-app";
	/// Application secret used by test clients.
	pub const TEST_APP_SECRET: &str = "test-secret";

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = Client<ReqwestHttpClient>;

	/// Builds the reqwest transport used against plain-HTTP mock servers.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.no_proxy()
			.build()
			.expect("Failed to build Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`Client`] whose endpoint points at `base_url`, typically a mock server.
	pub fn build_reqwest_test_client(base_url: &str) -> ReqwestTestClient {
		let endpoint = Endpoint::Custom(
			Url::parse(base_url).expect("Mock server base URL should parse successfully."),
		);
		let config = ClientConfig::builder(TEST_APP_ID, TEST_APP_SECRET)
			.endpoint(endpoint)
			.build()
			.expect("Test client configuration should build successfully.");

		Client::with_transport(config, test_reqwest_http_client())
	}
}

mod _prelude {
	pub use std::{
		borrow::Cow,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use ::http as http_types;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _, tokio as _};
