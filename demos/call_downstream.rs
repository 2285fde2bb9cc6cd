//! Demonstrates acquiring an outbound header and proxying a downstream call through a sidecar,
//! using an `httpmock` server in place of a real sidecar.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
use url::Url;
// self
use auth_sidecar::{
	client::{SidecarCall, SidecarClient},
	config::SidecarConfig,
	options::{AcquireTokenOptions, AgentContext, SidecarCallOptions},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let header_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/AuthorizationHeader/graph")
				.query_param("AgentIdentity", "demo-agent")
				.query_param("optionsOverride.Scopes", "User.Read");
			then.status(200).json_body(json!({ "authorizationHeader": "Bearer demo-outbound" }));
		})
		.await;
	let downstream_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/DownstreamApi/graph");
			then.status(200).json_body(json!({
				"statusCode": 200,
				"headers": { "content-type": ["application/json"] },
				"content": "{\"displayName\":\"Demo User\"}"
			}));
		})
		.await;
	let config = SidecarConfig::builder()
		.base_url(Url::parse(&server.base_url())?)
		.agent(AgentContext::default().with_agent_identity("demo-agent"))
		.build()?;
	let client = SidecarClient::new(config)?;
	let call = SidecarCall::new("graph").with_options(
		SidecarCallOptions::default()
			.with_scope("User.Read")
			.with_relative_path("v1.0/me")
			.with_acquire_token_options(AcquireTokenOptions::default().with_tenant("contoso")),
	);
	let header = client.get_authorization_header(&call, "Bearer demo-inbound").await?;

	println!("Outbound header acquired: {}.", header.authorization_header);

	let me = client.invoke_downstream_api(&call, "Bearer demo-inbound", None).await?;
	let profile: serde_json::Value = me.json()?;

	println!("Downstream status {}: {profile}.", me.status_code);

	header_mock.assert_async().await;
	downstream_mock.assert_async().await;
	client.close();

	Ok(())
}
