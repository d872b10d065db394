//! Password-grant token lifecycle.

// crates.io
use http::Method;
// self
use crate::{
	_prelude::*,
	auth::{Credential, TokenPayload},
	client::{Client, NO_QUERY, TOKEN_PATH},
	error::ConfigError,
	http::HttpTransport,
	obs::{self, OperationKind},
};

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Obtains a credential with the resource-owner password grant.
	///
	/// The request carries the application id/secret as basic auth and the user's
	/// `username`, `extension`, and `password` as a form body. On success the new credential
	/// replaces any previous one as a whole; on failure the previous credential is left
	/// untouched and the cause is wrapped in [`Error::Authentication`].
	pub async fn authorize(
		&self,
		username: &str,
		extension: &str,
		password: &str,
	) -> Result<Credential> {
		obs::observe(OperationKind::Authorize, "password_grant", async move {
			let _guard = self.authorize_guard.lock().await;
			let credential = self
				.request_password_grant(username, extension, password)
				.await
				.map_err(Error::authentication)?;

			*self.credential.write() = Some(credential.clone());

			Ok(credential)
		})
		.await
	}

	/// Returns `true` when a credential is present and has not expired.
	pub fn is_authorized(&self) -> bool {
		self.is_authorized_at(OffsetDateTime::now_utc())
	}

	/// Returns `true` when a credential is present and valid at `instant`.
	pub fn is_authorized_at(&self, instant: OffsetDateTime) -> bool {
		self.credential.read().as_ref().is_some_and(|credential| credential.is_valid_at(instant))
	}

	/// Returns a copy of the active credential, expired or not.
	pub fn credential(&self) -> Option<Credential> {
		self.credential.read().clone()
	}

	/// Installs a credential obtained elsewhere, e.g. restored from storage.
	pub fn set_credential(&self, credential: Credential) {
		*self.credential.write() = Some(credential);
	}

	/// Drops the active credential; subsequent bearer requests fail with
	/// [`Error::NotAuthenticated`].
	pub fn clear_credential(&self) -> Option<Credential> {
		self.credential.write().take()
	}

	async fn request_password_grant(
		&self,
		username: &str,
		extension: &str,
		password: &str,
	) -> Result<Credential> {
		let (app_id, app_secret) = {
			let config = self.config.read();

			(config.app_id.clone(), config.app_secret.clone())
		};
		let form = [
			("grant_type", "password"),
			("username", username),
			("extension", extension),
			("password", password),
		];
		let request = self
			.prepare(Method::POST, TOKEN_PATH, NO_QUERY)?
			.with_form_body(&form)
			.with_basic_auth(&app_id, app_secret.expose())?;
		let issued_at = OffsetDateTime::now_utc();
		let payload = self.dispatch_json::<TokenPayload>(request).await?;

		Ok(Credential::from_payload(payload, issued_at).map_err(ConfigError::from)?)
	}
}
