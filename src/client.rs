//! Sidecar client facade and the request pipeline shared by every operation.

pub mod call;

mod authorization;
mod downstream;

pub use call::*;

// crates.io
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	auth::ApiName,
	config::{self, APPLICATION_JSON, SidecarConfig},
	error::{ConfigError, UsageError},
	http::{HttpMethod, SidecarHttpClient, SidecarRequest},
	obs::{self, CallKind, CallOutcome, CallSpan},
	projection::QueryParameters,
	response::{self, SidecarPayload},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestSidecarClient = SidecarClient<ReqwestHttpClient>;

/// Typed client for one sidecar instance.
///
/// Every operation issues exactly one HTTP request: usage checks run first (nothing is sent
/// when they fail), then the request is dispatched through the configured transport and the
/// response is classified into a typed result, a [`SidecarError`](crate::error::SidecarError),
/// or a [`ShapeError`](crate::error::ShapeError). Nothing is retried or cached.
#[derive(Clone)]
pub struct SidecarClient<C>
where
	C: ?Sized + SidecarHttpClient,
{
	/// HTTP transport used for every sidecar request.
	pub http_client: Arc<C>,
	config: SidecarConfig,
	owns_transport: bool,
}
impl<C> SidecarClient<C>
where
	C: ?Sized + SidecarHttpClient,
{
	/// Creates a client that shares a caller-owned transport.
	///
	/// The client only holds a reference to the transport and never tears it down. The
	/// configured timeout is still applied to each request, but certificate verification is the
	/// supplied transport's responsibility: an insecure [`SidecarConfig::tls`] only emits the
	/// insecure-TLS warning here and cannot loosen a transport that verifies.
	pub fn with_http_client(config: SidecarConfig, http_client: impl Into<Arc<C>>) -> Self {
		if config.tls().is_insecure() {
			obs::warn_insecure_tls(config.base_url());
		}

		Self { http_client: http_client.into(), config, owns_transport: false }
	}

	/// Validated configuration.
	pub fn config(&self) -> &SidecarConfig {
		&self.config
	}

	/// Returns true when the client built its own transport.
	pub fn owns_transport(&self) -> bool {
		self.owns_transport
	}

	/// Releases the client; an owned transport's connection pool is closed once the last clone
	/// of this client is gone.
	pub fn close(self) {
		drop(self);
	}

	/// Runs one operation under its span, recording attempt and outcome.
	async fn dispatch<T, F>(&self, kind: CallKind, api: &str, prepare: F) -> Result<T>
	where
		T: SidecarPayload,
		F: FnOnce() -> Result<SidecarRequest>,
	{
		let span = CallSpan::new(kind, api);

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = prepare()?;
				let response = self.http_client.execute(request).await?;

				obs::trace_call_status(kind, Some(response.status));
				obs::record_sidecar_status(kind, response.status);

				response::parse_response::<T>(response.status, &response.body)
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(kind, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(kind, CallOutcome::Failure),
		}

		result
	}

	/// Assembles the request for `outbound`, validating every caller-supplied input.
	fn build_request(&self, outbound: Outbound<'_>) -> Result<SidecarRequest> {
		let Outbound { method, route, api, query, authorization, headers, body } = outbound;
		let mut url = match api {
			Some(api) => self.config.endpoint(&[route, api.as_str()]),
			None => self.config.endpoint(&[route]),
		}?;

		query.append_to(&mut url);

		let mut per_call = HeaderMap::new();

		for (raw_name, raw_value) in headers {
			if raw_name.eq_ignore_ascii_case(AUTHORIZATION.as_str()) {
				return Err(UsageError::AuthorizationInExtraHeaders.into());
			}

			let (name, value) = config::parse_header(raw_name, raw_value)
				.ok_or_else(|| UsageError::InvalidHeader { name: raw_name.clone() })?;

			per_call.insert(name, value);
		}

		let mut merged = HeaderMap::new();

		merged.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));

		if body.is_some() {
			merged.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
		}

		// Extending with a map replaces every value already stored under the same name.
		merged.extend(self.config.default_headers().clone());
		merged.extend(per_call);

		if let Some(authorization) = authorization {
			merged.insert(AUTHORIZATION, authorization);
		}

		Ok(SidecarRequest {
			method,
			url,
			headers: merged,
			body,
			timeout: Some(self.config.timeout()),
		})
	}
}
#[cfg(feature = "reqwest")]
impl SidecarClient<ReqwestHttpClient> {
	/// Creates a client that builds and owns a reqwest connection pool.
	///
	/// The pool applies the configured timeout and TLS policy. Insecure TLS emits a warning
	/// event when the `tracing` feature is enabled.
	pub fn new(config: SidecarConfig) -> Result<Self> {
		let insecure = config.tls().is_insecure();

		if insecure {
			obs::warn_insecure_tls(config.base_url());
		}

		let client = ReqwestClient::builder()
			.timeout(config.timeout())
			.danger_accept_invalid_certs(insecure)
			.build()
			.map_err(ConfigError::from)?;

		Ok(Self {
			http_client: Arc::new(ReqwestHttpClient::with_client(client)),
			config,
			owns_transport: true,
		})
	}
}
impl<C> Debug for SidecarClient<C>
where
	C: ?Sized + SidecarHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SidecarClient")
			.field("base_url", &self.config.base_url().as_str())
			.field("timeout", &self.config.timeout())
			.field("tls", &self.config.tls())
			.field("owns_transport", &self.owns_transport)
			.finish()
	}
}

/// Request description handed to [`SidecarClient::build_request`].
struct Outbound<'a> {
	method: HttpMethod,
	route: &'static str,
	api: Option<&'a ApiName>,
	query: QueryParameters,
	authorization: Option<HeaderValue>,
	headers: &'a [(String, String)],
	body: Option<Vec<u8>>,
}

/// Rejects blank or unsendable Authorization values.
fn require_authorization(header: &str) -> Result<HeaderValue, UsageError> {
	if header.trim().is_empty() {
		return Err(UsageError::MissingAuthorizationHeader);
	}

	let mut value = HeaderValue::from_str(header)
		.map_err(|_| UsageError::InvalidHeader { name: AUTHORIZATION.to_string() })?;

	value.set_sensitive(true);

	Ok(value)
}

#[cfg(test)]
mod tests {
	// crates.io
	use parking_lot::Mutex;
	// self
	use super::*;
	use crate::{
		error::TransportError,
		http::{RawResponse, TransportFuture},
		options::{AcquireTokenOptions, AgentContext, SidecarCallOptions},
	};

	/// Transport double that records requests and replays one canned response.
	#[derive(Debug)]
	struct RecordingTransport {
		requests: Mutex<Vec<SidecarRequest>>,
		status: u16,
		body: &'static str,
	}
	impl RecordingTransport {
		fn new(status: u16, body: &'static str) -> Arc<Self> {
			Arc::new(Self { requests: Mutex::new(Vec::new()), status, body })
		}

		fn requests(&self) -> Vec<SidecarRequest> {
			self.requests.lock().clone()
		}
	}
	impl SidecarHttpClient for RecordingTransport {
		fn execute<'a>(&'a self, request: SidecarRequest) -> TransportFuture<'a> {
			self.requests.lock().push(request);

			let response = RawResponse { status: self.status, body: self.body.as_bytes().to_vec() };

			Box::pin(async move { Ok(response) })
		}
	}

	/// Transport double that always fails to connect.
	struct RefusingTransport;
	impl SidecarHttpClient for RefusingTransport {
		fn execute<'a>(&'a self, _: SidecarRequest) -> TransportFuture<'a> {
			Box::pin(async {
				Err(TransportError::connect(std::io::Error::from(
					std::io::ErrorKind::ConnectionRefused,
				)))
			})
		}
	}

	fn config() -> SidecarConfig {
		SidecarConfig::builder()
			.base_url(Url::parse("https://sidecar.local/base/").expect("Fixture URL should parse."))
			.default_header("x-client", "tests")
			.agent(AgentContext::default().with_agent_identity("default-agent"))
			.build()
			.expect("Fixture config should build.")
	}

	fn client(transport: &Arc<RecordingTransport>) -> SidecarClient<RecordingTransport> {
		SidecarClient::with_http_client(config(), Arc::clone(transport))
	}

	#[tokio::test]
	async fn authorization_header_request_is_fully_formed() {
		let transport = RecordingTransport::new(200, r#"{"authorizationHeader":"Bearer abc123"}"#);
		let call = SidecarCall::new("graph")
			.with_agent_user_id("oid")
			.with_header("Accept", "application/problem+json")
			.with_options(
				SidecarCallOptions::default()
					.with_scopes(["a", "b"])
					.with_acquire_token_options(AcquireTokenOptions::default().with_tenant("t1")),
			);
		let result = client(&transport)
			.get_authorization_header(&call, "Bearer inbound")
			.await
			.expect("Header call should succeed.");

		assert_eq!(result.authorization_header.expose(), "Bearer abc123");

		let requests = transport.requests();
		let request = &requests[0];

		assert_eq!(requests.len(), 1);
		assert_eq!(request.method, HttpMethod::Get);
		assert_eq!(request.url.path(), "/base/AuthorizationHeader/graph");
		assert_eq!(
			request.url.query(),
			Some(
				"AgentIdentity=default-agent&AgentUserId=oid&optionsOverride.Scopes=a&\
				 optionsOverride.Scopes=b&optionsOverride.AcquireTokenOptions.Tenant=t1"
			)
		);
		assert_eq!(request.header("authorization"), Some("Bearer inbound"));
		assert!(request.headers[AUTHORIZATION].is_sensitive());
		assert_eq!(request.headers.get_all(ACCEPT).iter().count(), 1);
		assert_eq!(request.header("accept"), Some("application/problem+json"));
		assert_eq!(request.header("x-client"), Some("tests"));
		assert_eq!(request.header("content-type"), None);
		assert!(!format!("{request:?}").contains("Bearer inbound"));
		assert_eq!(request.body, None);
		assert_eq!(request.timeout, Some(config::DEFAULT_TIMEOUT));
	}

	#[tokio::test]
	async fn usage_errors_never_reach_the_transport() {
		let transport = RecordingTransport::new(200, r#"{"authorizationHeader":"Bearer x"}"#);
		let client = client(&transport);
		let err = client
			.get_authorization_header(&SidecarCall::new("  "), "Bearer x")
			.await
			.expect_err("Blank API name must be rejected.");

		assert!(matches!(err, Error::Usage(UsageError::EmptyApiName)));

		let err = client
			.get_authorization_header(&SidecarCall::new("graph"), " ")
			.await
			.expect_err("Blank Authorization header must be rejected.");

		assert!(matches!(err, Error::Usage(UsageError::MissingAuthorizationHeader)));

		let err = client
			.invoke_downstream_api(
				&SidecarCall::new("graph").with_header("AUTHORIZATION", "Bearer y"),
				"Bearer x",
				None,
			)
			.await
			.expect_err("Authorization extra header must be rejected.");

		assert!(matches!(err, Error::Usage(UsageError::AuthorizationInExtraHeaders)));

		let err = client
			.validate_authorization_header("Bearer\nx")
			.await
			.expect_err("Header with a line break must be rejected.");

		assert!(matches!(err, Error::Usage(UsageError::InvalidHeader { .. })));
		assert!(transport.requests().is_empty());
	}

	#[tokio::test]
	async fn unauthenticated_calls_send_no_authorization() {
		let transport =
			RecordingTransport::new(200, r#"{"statusCode":200,"headers":{},"content":"ok"}"#);
		let body = serde_json::json!({ "name": "report" });
		let result = client(&transport)
			.invoke_downstream_api_unauthenticated(&SidecarCall::new("reports"), Some(&body))
			.await
			.expect("Downstream call should succeed.");

		assert_eq!(result.content.as_text(), Some("ok"));

		let request = &transport.requests()[0];

		assert_eq!(request.method, HttpMethod::Post);
		assert_eq!(request.url.path(), "/base/DownstreamApiUnauthenticated/reports");
		assert_eq!(request.header("authorization"), None);
		assert_eq!(request.header("content-type"), Some(APPLICATION_JSON));
		assert_eq!(request.body.as_deref(), Some(br#"{"name":"report"}"#.as_slice()));
	}

	#[tokio::test]
	async fn post_authorization_header_sends_options_as_body() {
		let transport = RecordingTransport::new(200, r#"{"authorizationHeader":"PoP xyz"}"#);
		let call = SidecarCall::new("graph").with_agent_username("user@contoso.com").with_options(
			SidecarCallOptions::default().with_scope("User.Read").with_protocol_scheme("PoP"),
		);

		client(&transport)
			.post_authorization_header(&call, "Bearer inbound")
			.await
			.expect("Body flavor should succeed.");

		let request = &transport.requests()[0];
		let body: JsonValue = serde_json::from_slice(request.body.as_deref().unwrap_or_default())
			.expect("Body should be JSON.");

		assert_eq!(request.method, HttpMethod::Post);
		assert_eq!(
			request.url.query(),
			Some("AgentIdentity=default-agent&AgentUsername=user%40contoso.com")
		);
		assert_eq!(body, serde_json::json!({ "scopes": ["User.Read"], "protocolScheme": "PoP" }));
	}

	#[tokio::test]
	async fn validate_targets_the_validate_route() {
		let transport = RecordingTransport::new(
			200,
			r#"{"protocol":"Bearer","token":"eyJ0","claims":{"oid":"o1"}}"#,
		);
		let result = client(&transport)
			.validate_authorization_header("Bearer eyJ0")
			.await
			.expect("Validate should succeed.");

		assert_eq!(result.claim_str("oid"), Some("o1"));

		let request = &transport.requests()[0];

		assert_eq!(request.url.as_str(), "https://sidecar.local/base/Validate");
		assert_eq!(request.header("authorization"), Some("Bearer eyJ0"));
	}

	#[tokio::test]
	async fn transport_failures_stay_transport_errors() {
		let transport = Arc::new(RefusingTransport);
		let client = SidecarClient::<RefusingTransport>::with_http_client(config(), transport);
		let err = client
			.get_authorization_header_unauthenticated(&SidecarCall::new("graph"))
			.await
			.expect_err("Refused connection must fail.");

		assert!(err.is_transport());
		assert_eq!(err.status(), None);
		assert!(!client.owns_transport());
	}

	#[tokio::test]
	async fn shared_transport_keeps_insecure_config_but_not_its_tls() {
		let insecure =
			SidecarConfig::insecure_localhost(7255).expect("Localhost config should build.");
		let transport = RecordingTransport::new(200, r#"{"authorizationHeader":"Bearer x"}"#);
		let client =
			SidecarClient::<RecordingTransport>::with_http_client(insecure, Arc::clone(&transport));

		client
			.get_authorization_header_unauthenticated(&SidecarCall::new("graph"))
			.await
			.expect("Shared transport call should succeed.");

		let request = &transport.requests()[0];

		assert!(client.config().tls().is_insecure());
		assert!(!client.owns_transport());
		assert_eq!(request.url.path(), "/AuthorizationHeaderUnauthenticated/graph");
		assert_eq!(request.timeout, Some(config::DEFAULT_TIMEOUT));
	}
}
