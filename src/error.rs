//! Client-level error types covering transport, protocol, shape, usage, and configuration
//! failures.

// self
use crate::{_prelude::*, response::ProblemDetails};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The sidecar could not be reached (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The sidecar answered with an HTTP error status.
	#[error(transparent)]
	Sidecar(#[from] SidecarError),
	/// The sidecar answered successfully but the payload does not match the protocol.
	#[error(transparent)]
	Shape(#[from] ShapeError),
	/// The caller omitted or malformed a required input; no request was sent.
	#[error(transparent)]
	Usage(#[from] UsageError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// HTTP status returned by the sidecar, when the failure is a protocol error.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Sidecar(e) => Some(e.status),
			_ => None,
		}
	}

	/// Problem payload attached to a protocol error, if the sidecar sent one.
	pub fn problem_details(&self) -> Option<&ProblemDetails> {
		match self {
			Self::Sidecar(e) => e.problem.as_ref(),
			_ => None,
		}
	}

	/// Returns true when the sidecar was unreachable.
	pub fn is_transport(&self) -> bool {
		matches!(self, Self::Transport(_))
	}
}

/// Well-formed rejection returned by the sidecar (HTTP status >= 400).
#[derive(Clone, Debug, PartialEq, ThisError)]
#[error("{message}")]
pub struct SidecarError {
	/// HTTP status code returned by the sidecar.
	pub status: u16,
	/// Message taken from the problem `detail`, then `title`, then a generic `HTTP {status}`.
	pub message: String,
	/// Parsed RFC 7807 payload, when the error body was a JSON object.
	pub problem: Option<ProblemDetails>,
}
impl SidecarError {
	/// Builds an error from a status and optional problem payload, deriving the message.
	pub fn new(status: u16, problem: Option<ProblemDetails>) -> Self {
		let message = problem
			.as_ref()
			.and_then(ProblemDetails::summary)
			.map(ToOwned::to_owned)
			.unwrap_or_else(|| format!("HTTP {status}"));

		Self { status, message, problem }
	}
}

/// Success responses whose payload does not match the expected shape.
#[derive(Debug, ThisError)]
pub enum ShapeError {
	/// The body decoded to something other than a JSON object.
	#[error("Sidecar response has an unexpected shape: expected a JSON object, found {found}.")]
	UnexpectedShape {
		/// Short label describing what was decoded instead.
		found: &'static str,
	},
	/// A mandatory key is missing from the payload.
	#[error("Sidecar response is missing the required `{field}` field.")]
	MissingField {
		/// Wire name of the missing key.
		field: &'static str,
	},
	/// The payload contains the required keys but a value has the wrong type.
	#[error("Sidecar response could not be decoded.")]
	Decode {
		/// Path-aware decoding failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Caller mistakes detected before any network call is made.
#[derive(Debug, ThisError)]
pub enum UsageError {
	/// API names are route segments and cannot be empty.
	#[error("API name cannot be empty.")]
	EmptyApiName,
	/// Authenticated calls need an explicit Authorization header.
	#[error("Authenticated sidecar calls require a non-empty Authorization header.")]
	MissingAuthorizationHeader,
	/// Authorization must be passed through the dedicated argument.
	#[error("The Authorization header cannot be supplied as an extra header.")]
	AuthorizationInExtraHeaders,
	/// Header name or value cannot be sent over HTTP.
	#[error("Header `{name}` is not a valid HTTP header.")]
	InvalidHeader {
		/// Offending header name.
		name: String,
	},
	/// The JSON body could not be serialized.
	#[error("Request body could not be serialized as JSON.")]
	InvalidBody(#[source] serde_json::Error),
}

/// Configuration and validation failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// The configured base URL does not parse.
	#[error("Sidecar base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Only `http` and `https` sidecars are supported.
	#[error("Sidecar base URL must use http or https, got `{scheme}`.")]
	UnsupportedScheme {
		/// Scheme found in the configured URL.
		scheme: String,
	},
	/// Base URLs such as `mailto:` cannot carry route segments.
	#[error("Sidecar base URL `{url}` cannot be used as a base.")]
	CannotBeABase {
		/// Offending URL.
		url: String,
	},
	/// A zero timeout would fail every request before it is sent.
	#[error("Sidecar request timeout must be greater than zero.")]
	ZeroTimeout,
	/// Authorization is supplied per call and never as a default.
	#[error("Authorization cannot be configured as a default header.")]
	AuthorizationDefaultHeader,
	/// A default header cannot be sent over HTTP.
	#[error("Default header `{name}` is not a valid HTTP header.")]
	InvalidDefaultHeader {
		/// Offending header name.
		name: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO) that indicate the sidecar is unreachable.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// The request did not complete within the configured timeout.
	#[error("Request to the sidecar timed out.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// The connection to the sidecar could not be established.
	#[error("Could not connect to the sidecar.")]
	Connect {
		/// Transport-specific connection error.
		#[source]
		source: BoxError,
	},
	/// Underlying HTTP client reported another network failure.
	#[error("Network error occurred while calling the sidecar.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the sidecar.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}

	/// Wraps a transport-specific connection error.
	pub fn connect(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Connect { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() {
			Self::timeout(e)
		} else if e.is_connect() {
			Self::connect(e)
		} else {
			Self::network(e)
		}
	}
}
