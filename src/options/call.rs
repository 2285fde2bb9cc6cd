//! Downstream-call overrides for a single sidecar request.

// self
use crate::{
	_prelude::*,
	options::{AcquireTokenOptions, WireField, WireRecord},
};

/// Name used by the sidecar's own documentation for the same record.
pub type DownstreamApiOptions = SidecarCallOptions;

/// Per-call overrides of the sidecar's configuration for a named downstream API.
///
/// Unset fields keep the sidecar default. `protocol_scheme`, `extra_header_parameters`, and
/// `extra_query_parameters` only travel in JSON bodies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SidecarCallOptions {
	/// Scopes to request, in order.
	pub scopes: Option<Vec<String>>,
	/// Selects the client-credentials flow (`true`) over the delegated flow.
	pub request_app_token: Option<bool>,
	/// Base URL of the downstream API.
	pub base_url: Option<String>,
	/// Path appended to the downstream base URL.
	pub relative_path: Option<String>,
	/// HTTP method the sidecar uses toward the downstream API.
	pub http_method: Option<String>,
	/// Accept header forwarded downstream.
	pub accept_header: Option<String>,
	/// Content type forwarded downstream.
	pub content_type: Option<String>,
	/// Token-acquisition overrides.
	pub acquire_token_options: Option<AcquireTokenOptions>,
	/// Authorization scheme (the sidecar defaults to `Bearer`).
	pub protocol_scheme: Option<String>,
	/// Extra headers forwarded downstream.
	pub extra_header_parameters: Option<BTreeMap<String, String>>,
	/// Extra query parameters forwarded downstream.
	pub extra_query_parameters: Option<BTreeMap<String, String>>,
}
impl SidecarCallOptions {
	/// Replaces the scope list.
	pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes = Some(scopes.into_iter().map(Into::into).collect());

		self
	}

	/// Appends one scope, keeping insertion order.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scopes.get_or_insert_with(Vec::new).push(scope.into());

		self
	}

	/// Sets the request-app-token flag.
	pub fn with_request_app_token(mut self, request_app_token: bool) -> Self {
		self.request_app_token = Some(request_app_token);

		self
	}

	/// Sets the downstream base URL.
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = Some(base_url.into());

		self
	}

	/// Sets the downstream relative path.
	pub fn with_relative_path(mut self, relative_path: impl Into<String>) -> Self {
		self.relative_path = Some(relative_path.into());

		self
	}

	/// Sets the downstream HTTP method.
	pub fn with_http_method(mut self, http_method: impl Into<String>) -> Self {
		self.http_method = Some(http_method.into());

		self
	}

	/// Sets the downstream Accept header.
	pub fn with_accept_header(mut self, accept_header: impl Into<String>) -> Self {
		self.accept_header = Some(accept_header.into());

		self
	}

	/// Sets the downstream content type.
	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());

		self
	}

	/// Sets the token-acquisition overrides.
	pub fn with_acquire_token_options(mut self, options: AcquireTokenOptions) -> Self {
		self.acquire_token_options = Some(options);

		self
	}

	/// Sets the authorization protocol scheme.
	pub fn with_protocol_scheme(mut self, scheme: impl Into<String>) -> Self {
		self.protocol_scheme = Some(scheme.into());

		self
	}

	/// Adds one downstream header.
	pub fn with_extra_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra_header_parameters
			.get_or_insert_with(BTreeMap::new)
			.insert(name.into(), value.into());

		self
	}

	/// Adds one downstream query parameter.
	pub fn with_extra_query_parameter(
		mut self,
		key: impl Into<String>,
		value: impl Into<String>,
	) -> Self {
		self.extra_query_parameters
			.get_or_insert_with(BTreeMap::new)
			.insert(key.into(), value.into());

		self
	}
}
impl WireRecord for SidecarCallOptions {
	fn wire_fields(&self) -> Vec<WireField<'_>> {
		vec![
			WireField::list("Scopes", "scopes", &self.scopes),
			WireField::flag("RequestAppToken", "requestAppToken", self.request_app_token),
			WireField::text("BaseUrl", "baseUrl", &self.base_url),
			WireField::text("RelativePath", "relativePath", &self.relative_path),
			WireField::text("HttpMethod", "httpMethod", &self.http_method),
			WireField::text("AcceptHeader", "acceptHeader", &self.accept_header),
			WireField::text("ContentType", "contentType", &self.content_type),
			WireField::record(
				"AcquireTokenOptions",
				"acquireTokenOptions",
				&self.acquire_token_options,
			),
			WireField::body_text("protocolScheme", &self.protocol_scheme),
			WireField::body_map("extraHeaderParameters", &self.extra_header_parameters),
			WireField::body_map("extraQueryParameters", &self.extra_query_parameters),
		]
	}
}
