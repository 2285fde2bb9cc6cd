//! Authorization-header operations: validation, acquisition, and the JSON-body flavor.

// self
use crate::{
	_prelude::*,
	auth::ApiName,
	client::{Outbound, SidecarCall, SidecarClient, require_authorization},
	error::UsageError,
	http::{HttpMethod, SidecarHttpClient},
	obs::CallKind,
	projection::{self, QueryParameters},
	response::{AuthorizationHeaderResult, ValidateAuthorizationHeaderResult},
};

impl<C> SidecarClient<C>
where
	C: ?Sized + SidecarHttpClient,
{
	/// Validates an inbound `Authorization` header (`GET /Validate`).
	pub async fn validate_authorization_header(
		&self,
		authorization_header: &str,
	) -> Result<ValidateAuthorizationHeaderResult> {
		self.dispatch(CallKind::Validate, "", || {
			self.build_request(Outbound {
				method: HttpMethod::Get,
				route: "Validate",
				api: None,
				query: QueryParameters::default(),
				authorization: Some(require_authorization(authorization_header)?),
				headers: &[],
				body: None,
			})
		})
		.await
	}

	/// Acquires an outbound header for `call.api_name` on behalf of the inbound caller
	/// (`GET /AuthorizationHeader/{apiName}`).
	pub async fn get_authorization_header(
		&self,
		call: &SidecarCall,
		authorization_header: &str,
	) -> Result<AuthorizationHeaderResult> {
		self.dispatch(CallKind::AuthorizationHeader, &call.api_name, || {
			let api = ApiName::new(&call.api_name)?;
			let authorization = require_authorization(authorization_header)?;

			self.build_request(Outbound {
				method: HttpMethod::Get,
				route: "AuthorizationHeader",
				api: Some(&api),
				query: self.project_call(call, true),
				authorization: Some(authorization),
				headers: &call.headers,
				body: None,
			})
		})
		.await
	}

	/// Acquires an outbound header using the sidecar's own identity
	/// (`GET /AuthorizationHeaderUnauthenticated/{apiName}`).
	pub async fn get_authorization_header_unauthenticated(
		&self,
		call: &SidecarCall,
	) -> Result<AuthorizationHeaderResult> {
		self.dispatch(CallKind::AuthorizationHeaderUnauthenticated, &call.api_name, || {
			let api = ApiName::new(&call.api_name)?;

			self.build_request(Outbound {
				method: HttpMethod::Get,
				route: "AuthorizationHeaderUnauthenticated",
				api: Some(&api),
				query: self.project_call(call, true),
				authorization: None,
				headers: &call.headers,
				body: None,
			})
		})
		.await
	}

	/// Acquires an outbound header with the overrides sent as a JSON body
	/// (`POST /AuthorizationHeader/{apiName}`).
	///
	/// Identity context still travels in the query string. Body-only overrides such as
	/// `protocol_scheme` or `extra_header_parameters` only reach the sidecar through this call.
	pub async fn post_authorization_header(
		&self,
		call: &SidecarCall,
		authorization_header: &str,
	) -> Result<AuthorizationHeaderResult> {
		self.dispatch(CallKind::AuthorizationHeaderBody, &call.api_name, || {
			let api = ApiName::new(&call.api_name)?;
			let authorization = require_authorization(authorization_header)?;
			let body = call.options.as_ref().map(projection::project_body).unwrap_or_default();
			let body = serde_json::to_vec(&body).map_err(UsageError::InvalidBody)?;

			self.build_request(Outbound {
				method: HttpMethod::Post,
				route: "AuthorizationHeader",
				api: Some(&api),
				query: self.project_call(call, false),
				authorization: Some(authorization),
				headers: &call.headers,
				body: Some(body),
			})
		})
		.await
	}

	/// Projects the call's context (layered over the configured defaults) and, when
	/// `with_options` is set, its overrides.
	pub(crate) fn project_call(&self, call: &SidecarCall, with_options: bool) -> QueryParameters {
		let context = call.context.or_defaults(self.config().agent());
		let options = call.options.as_ref().filter(|_| with_options);

		projection::project_query(&context, options)
	}
}
