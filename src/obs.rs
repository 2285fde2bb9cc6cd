//! Optional observability helpers for sidecar calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `auth_sidecar.call` with the `call`
//!   (operation) and `api` (downstream API name) fields.
//! - Enable `metrics` to increment the `auth_sidecar_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`, and the
//!   `auth_sidecar_response_total` counter for every response, labeled by `call` +
//!   `status_class`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Sidecar operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// `GET /Validate`.
	Validate,
	/// `GET /AuthorizationHeader/{apiName}`.
	AuthorizationHeader,
	/// `GET /AuthorizationHeaderUnauthenticated/{apiName}`.
	AuthorizationHeaderUnauthenticated,
	/// `POST /AuthorizationHeader/{apiName}` with a JSON body.
	AuthorizationHeaderBody,
	/// `POST /DownstreamApi/{apiName}`.
	DownstreamApi,
	/// `POST /DownstreamApiUnauthenticated/{apiName}`.
	DownstreamApiUnauthenticated,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Validate => "validate",
			CallKind::AuthorizationHeader => "authorization_header",
			CallKind::AuthorizationHeaderUnauthenticated => "authorization_header_unauthenticated",
			CallKind::AuthorizationHeaderBody => "authorization_header_body",
			CallKind::DownstreamApi => "downstream_api",
			CallKind::DownstreamApiUnauthenticated => "downstream_api_unauthenticated",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
