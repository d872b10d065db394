//! Walks the subscription lifecycle against a local mock platform: authorize with the
//! password grant, register a webhook subscription, renew it, and delete it.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use ringcentral_client::{
	client::{Client, SUBSCRIPTION_PATH, TOKEN_PATH},
	config::{ClientConfig, Endpoint},
	http::ReqwestHttpClient,
	reqwest,
	subscription::DeliveryMode,
};

const SUBSCRIPTION_BODY: &str = r#"{
	"id": "demo-sub",
	"uri": "https://platform.ringcentral.com/restapi/v1.0/subscription/demo-sub",
	"eventFilters": ["/restapi/v1.0/account/~/extension/~/presence"],
	"expirationTime": "2030-01-08T00:00:00.000Z",
	"expiresIn": 604800,
	"status": "Active",
	"deliveryMode": { "transportType": "WebHook", "address": "https://hooks.example.com/rc" }
}"#;

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"bearer\",\"expires_in\":3600}",
			);
		})
		.await;
	let create_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(SUBSCRIPTION_PATH);
			then.status(200).header("content-type", "application/json").body(SUBSCRIPTION_BODY);
		})
		.await;
	let renew_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(format!("{SUBSCRIPTION_PATH}/demo-sub/renew"));
			then.status(200).header("content-type", "application/json").body(SUBSCRIPTION_BODY);
		})
		.await;
	let delete_mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path(format!("{SUBSCRIPTION_PATH}/demo-sub"));
			then.status(204);
		})
		.await;
	let config = ClientConfig::builder("demo-app", "demo-secret")
		.endpoint(Endpoint::Custom(Url::parse(&server.base_url())?))
		.build()?;
	let transport = ReqwestHttpClient::with_client(reqwest::Client::builder().no_proxy().build()?);
	let client = Client::with_transport(config, transport);
	let credential = client.authorize("+16505550100", "101", "demo-password").await?;

	println!("Authorized until {}.", credential.expires_at);

	let subscription = client
		.create_subscription(
			["/restapi/v1.0/account/~/extension/~/presence"],
			DeliveryMode::webhook("https://hooks.example.com/rc"),
			0,
		)
		.await?;

	println!("Created subscription {} ({:?}).", subscription.id, subscription.status);

	let renewed = client.renew_subscription(&subscription).await?;

	println!("Renewed; expires at {:?}.", renewed.expiration_time);

	client.delete_subscription(renewed.id.as_str()).await?;

	println!("Deleted subscription {}.", renewed.id);

	token_mock.assert_async().await;
	create_mock.assert_async().await;
	renew_mock.assert_async().await;
	delete_mock.assert_async().await;

	Ok(())
}
