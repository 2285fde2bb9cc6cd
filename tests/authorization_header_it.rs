// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use auth_sidecar::{
	_preludet::*,
	client::SidecarCall,
	error::{ShapeError, SidecarError},
	options::{AcquireTokenOptions, SidecarCallOptions},
};

#[tokio::test]
async fn authorization_header_returns_the_sidecar_header() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/AuthorizationHeader/graph")
				.header("authorization", "Bearer inbound")
				.header("accept", "application/json")
				.query_param("AgentIdentity", "agent-app")
				.query_param("optionsOverride.Scopes", "User.Read")
				.query_param("optionsOverride.Scopes", "Mail.Read")
				.query_param("optionsOverride.RequestAppToken", "false")
				.query_param("optionsOverride.AcquireTokenOptions.Tenant", "contoso");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "authorizationHeader": "Bearer abc123" }));
		})
		.await;
	let client = build_reqwest_test_client(&server.base_url());
	let call = SidecarCall::new("graph").with_agent_identity("agent-app").with_options(
		SidecarCallOptions::default()
			.with_scopes(["User.Read", "Mail.Read"])
			.with_request_app_token(false)
			.with_acquire_token_options(AcquireTokenOptions::default().with_tenant("contoso")),
	);
	let result = client
		.get_authorization_header(&call, "Bearer inbound")
		.await
		.expect("Authorization header call should succeed.");

	assert_eq!(result.authorization_header.expose(), "Bearer abc123");

	mock.assert_async().await;
}

#[tokio::test]
async fn not_found_problem_becomes_sidecar_error() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/AuthorizationHeader/unknown-api");
			then.status(404).header("content-type", "application/problem+json").json_body(json!({
				"type": "https://tools.ietf.org/html/rfc9110#section-15.5.5",
				"title": "Not Found",
				"status": 404,
				"detail": "API not configured",
				"traceId": "00-1-2-00"
			}));
		})
		.await;
	let client = build_reqwest_test_client(&server.base_url());
	let err = client
		.get_authorization_header(&SidecarCall::new("unknown-api"), "Bearer x")
		.await
		.expect_err("Unknown API must surface a sidecar error.");

	mock.assert_async().await;

	assert_eq!(err.status(), Some(404));
	assert_eq!(err.to_string(), "API not configured");

	let problem = err.problem_details().expect("Problem details should be attached.");

	assert_eq!(problem.title.as_deref(), Some("Not Found"));
	assert_eq!(problem.extension("traceId"), Some(&json!("00-1-2-00")));
}

#[tokio::test]
async fn plain_text_error_has_generic_message() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/AuthorizationHeader/graph");
			then.status(503).body("Service Unavailable");
		})
		.await;

	let client = build_reqwest_test_client(&server.base_url());
	let err = client
		.get_authorization_header(&SidecarCall::new("graph"), "Bearer x")
		.await
		.expect_err("503 must surface a sidecar error.");

	match err {
		Error::Sidecar(SidecarError { status, message, problem }) => {
			assert_eq!(status, 503);
			assert_eq!(message, "HTTP 503");
			assert!(problem.is_none());
		},
		other => panic!("Unexpected error: {other:?}."),
	}
}

#[tokio::test]
async fn non_json_success_is_a_shape_error() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/AuthorizationHeader/graph");
			then.status(200).header("content-type", "text/html").body("<html>proxy</html>");
		})
		.await;

	let client = build_reqwest_test_client(&server.base_url());
	let err = client
		.get_authorization_header(&SidecarCall::new("graph"), "Bearer x")
		.await
		.expect_err("HTML success body must be rejected.");

	assert!(matches!(err, Error::Shape(ShapeError::UnexpectedShape { found: "non-JSON text" })));
}

#[tokio::test]
async fn missing_header_field_is_a_shape_error() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/AuthorizationHeader/graph");
			then.status(200).json_body(json!({ "header": "Bearer abc123" }));
		})
		.await;

	let client = build_reqwest_test_client(&server.base_url());
	let err = client
		.get_authorization_header(&SidecarCall::new("graph"), "Bearer x")
		.await
		.expect_err("Missing authorizationHeader must be rejected.");

	assert!(matches!(
		err,
		Error::Shape(ShapeError::MissingField { field: "authorizationHeader" })
	));
}

#[tokio::test]
async fn unauthenticated_header_omits_authorization() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/AuthorizationHeaderUnauthenticated/graph")
				.header_missing("authorization")
				.query_param("AgentUserId", "oid-1");
			then.status(200).json_body(json!({ "authorizationHeader": "Bearer app" }));
		})
		.await;
	let client = build_reqwest_test_client(&server.base_url());
	let call = SidecarCall::new("graph").with_agent_user_id("oid-1");
	let result = client
		.get_authorization_header_unauthenticated(&call)
		.await
		.expect("Unauthenticated header call should succeed.");

	assert_eq!(result.authorization_header.expose(), "Bearer app");

	mock.assert_async().await;
}

#[tokio::test]
async fn post_authorization_header_sends_json_body() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/AuthorizationHeader/graph")
				.header("content-type", "application/json")
				.query_param("AgentUsername", "user@contoso.com")
				.json_body(json!({
					"scopes": ["User.Read"],
					"protocolScheme": "PoP",
					"acquireTokenOptions": { "popPublicKey": "key", "popClaim": "claim" }
				}));
			then.status(200).json_body(json!({ "authorizationHeader": "PoP signed" }));
		})
		.await;
	let client = build_reqwest_test_client(&server.base_url());
	let call = SidecarCall::new("graph").with_agent_username("user@contoso.com").with_options(
		SidecarCallOptions::default()
			.with_scope("User.Read")
			.with_protocol_scheme("PoP")
			.with_acquire_token_options(
				AcquireTokenOptions::default().with_pop_public_key("key").with_pop_claim("claim"),
			),
	);
	let result = client
		.post_authorization_header(&call, "Bearer inbound")
		.await
		.expect("Body flavor should succeed.");

	assert_eq!(result.authorization_header.expose(), "PoP signed");

	mock.assert_async().await;
}

#[tokio::test]
async fn validate_returns_claims() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/Validate").header("authorization", "Bearer eyJ0");
			then.status(200).json_body(json!({
				"protocol": "Bearer",
				"token": "eyJ0",
				"claims": { "oid": "o1", "scp": "access_as_user" }
			}));
		})
		.await;
	let client = build_reqwest_test_client(&server.base_url());
	let result = client
		.validate_authorization_header("Bearer eyJ0")
		.await
		.expect("Validate should succeed.");

	assert_eq!(result.protocol, "Bearer");
	assert_eq!(result.token.expose(), "eyJ0");
	assert_eq!(result.claim_str("scp"), Some("access_as_user"));

	mock.assert_async().await;
}

#[tokio::test]
async fn validate_rejection_keeps_the_status() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/Validate");
			then.status(401).json_body(json!({ "title": "Unauthorized", "status": 401 }));
		})
		.await;

	let client = build_reqwest_test_client(&server.base_url());
	let err = client
		.validate_authorization_header("Bearer expired")
		.await
		.expect_err("Expired token must be rejected.");

	assert_eq!(err.status(), Some(401));
	assert_eq!(err.to_string(), "Unauthorized");
	assert_eq!(err.problem_details().and_then(|problem| problem.status), Some(401));
}
