//! Downstream API calls proxied through the sidecar.

// self
use crate::{
	_prelude::*,
	auth::ApiName,
	client::{Outbound, SidecarCall, SidecarClient, require_authorization},
	error::UsageError,
	http::{HttpMethod, SidecarHttpClient},
	obs::CallKind,
	response::DownstreamApiResult,
};

impl<C> SidecarClient<C>
where
	C: ?Sized + SidecarHttpClient,
{
	/// Calls a downstream API on behalf of the inbound caller
	/// (`POST /DownstreamApi/{apiName}`).
	///
	/// `body` is forwarded to the downstream API as JSON. A downstream error status is not a
	/// failure here; inspect [`DownstreamApiResult::status_code`].
	pub async fn invoke_downstream_api(
		&self,
		call: &SidecarCall,
		authorization_header: &str,
		body: Option<&JsonValue>,
	) -> Result<DownstreamApiResult> {
		self.dispatch(CallKind::DownstreamApi, &call.api_name, || {
			let api = ApiName::new(&call.api_name)?;
			let authorization = require_authorization(authorization_header)?;

			self.build_request(Outbound {
				method: HttpMethod::Post,
				route: "DownstreamApi",
				api: Some(&api),
				query: self.project_call(call, true),
				authorization: Some(authorization),
				headers: &call.headers,
				body: encode_body(body)?,
			})
		})
		.await
	}

	/// Calls a downstream API using the sidecar's own identity
	/// (`POST /DownstreamApiUnauthenticated/{apiName}`).
	pub async fn invoke_downstream_api_unauthenticated(
		&self,
		call: &SidecarCall,
		body: Option<&JsonValue>,
	) -> Result<DownstreamApiResult> {
		self.dispatch(CallKind::DownstreamApiUnauthenticated, &call.api_name, || {
			let api = ApiName::new(&call.api_name)?;

			self.build_request(Outbound {
				method: HttpMethod::Post,
				route: "DownstreamApiUnauthenticated",
				api: Some(&api),
				query: self.project_call(call, true),
				authorization: None,
				headers: &call.headers,
				body: encode_body(body)?,
			})
		})
		.await
	}
}

fn encode_body(body: Option<&JsonValue>) -> Result<Option<Vec<u8>>, UsageError> {
	body.map(serde_json::to_vec).transpose().map_err(UsageError::InvalidBody)
}
