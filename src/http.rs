//! Transport primitives for sidecar exchanges.
//!
//! The module exposes [`SidecarHttpClient`] alongside [`SidecarRequest`] and [`RawResponse`] so
//! downstream crates can plug in custom HTTP stacks. The client builds fully-formed requests
//! (URL, query, headers, optional JSON body) and only asks the transport to move bytes; status
//! classification and payload parsing stay in [`crate::response`].

// std
use std::ops::Deref;
// crates.io
pub use http::{HeaderMap, HeaderName, HeaderValue, header};
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`SidecarHttpClient::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + 'a + Send>>;

/// HTTP methods used by the sidecar routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
}
impl HttpMethod {
	/// Returns the method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully-resolved request handed to a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidecarRequest {
	/// HTTP method.
	pub method: HttpMethod,
	/// Absolute URL including the encoded query string.
	pub url: Url,
	/// Merged and validated headers; the Authorization value is marked sensitive.
	pub headers: HeaderMap,
	/// Serialized JSON body, when one is sent.
	pub body: Option<Vec<u8>>,
	/// Per-request timeout.
	pub timeout: Option<Duration>,
}
impl SidecarRequest {
	/// Returns the header value for `name` when it is visible ASCII.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|value| value.to_str().ok())
	}
}

/// Status and body bytes returned by the sidecar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw body bytes; empty when the sidecar sent no content.
	pub body: Vec<u8>,
}

/// Abstraction over HTTP transports capable of executing sidecar requests.
///
/// The trait is the client's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so one transport can be shared across clients behind an `Arc`, and
/// the returned future must be `Send` so client futures can hop executors. Any status code is a
/// successful exchange at this layer; only failures to obtain a response map to
/// [`TransportError`].
pub trait SidecarHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves with the response status and body.
	fn execute<'a>(&'a self, request: SidecarRequest) -> TransportFuture<'a>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Debug for ReqwestHttpClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ReqwestHttpClient(..)")
	}
}
#[cfg(feature = "reqwest")]
impl SidecarHttpClient for ReqwestHttpClient {
	fn execute<'a>(&'a self, request: SidecarRequest) -> TransportFuture<'a> {
		Box::pin(async move {
			let SidecarRequest { method, url, headers, body, timeout } = request;
			let method = match method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Post => reqwest::Method::POST,
			};
			let mut builder = self.0.request(method, url).headers(headers);

			if let Some(body) = body {
				builder = builder.body(body);
			}
			if let Some(timeout) = timeout {
				builder = builder.timeout(timeout);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(RawResponse { status, body })
		})
	}
}
