//! Parsing of raw sidecar responses into typed results or domain errors.
//!
//! Every exchange goes through the same steps: an empty body decodes to [`Payload::Absent`],
//! anything else is strictly JSON-decoded with a lossy-text fallback, error statuses become a
//! [`SidecarError`] (carrying [`ProblemDetails`] when the body is an object), and success
//! bodies must be JSON objects holding every key the target [`SidecarPayload`] requires.

pub mod problem;
pub mod result;

pub use problem::*;
pub use result::*;

// self
use crate::{
	_prelude::*,
	error::{ShapeError, SidecarError},
};

/// First status code treated as a sidecar-level failure.
pub const ERROR_STATUS_THRESHOLD: u16 = 400;

/// Decoded response body.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
	/// The body was empty.
	Absent,
	/// The body was valid JSON.
	Json(JsonValue),
	/// The body was not JSON; kept as (lossily decoded) text.
	Text(String),
}
impl Payload {
	/// Decodes a raw body, falling back to text when it is not valid JSON.
	pub fn decode(body: &[u8]) -> Self {
		if body.is_empty() {
			return Self::Absent;
		}

		match serde_json::from_slice(body) {
			Ok(value) => Self::Json(value),
			Err(_) => Self::Text(String::from_utf8_lossy(body).into_owned()),
		}
	}

	/// Short label describing the payload, used in shape errors.
	pub fn describe(&self) -> &'static str {
		match self {
			Self::Absent => "an empty body",
			Self::Text(_) => "non-JSON text",
			Self::Json(JsonValue::Null) => "null",
			Self::Json(JsonValue::Bool(_)) => "a boolean",
			Self::Json(JsonValue::Number(_)) => "a number",
			Self::Json(JsonValue::String(_)) => "a string",
			Self::Json(JsonValue::Array(_)) => "an array",
			Self::Json(JsonValue::Object(_)) => "an object",
		}
	}
}

/// Parses a raw response into `T`, or the appropriate domain error.
pub fn parse_response<T>(status: u16, body: &[u8]) -> Result<T>
where
	T: SidecarPayload,
{
	let object = expect_object(status, body)?;

	Ok(T::from_object(object)?)
}

/// Classifies the status and returns the JSON object carried by a success response.
pub fn expect_object(status: u16, body: &[u8]) -> Result<JsonMap<String, JsonValue>> {
	let payload = Payload::decode(body);

	if status >= ERROR_STATUS_THRESHOLD {
		return Err(sidecar_error(status, payload).into());
	}

	match payload {
		Payload::Json(JsonValue::Object(object)) => Ok(object),
		other => Err(ShapeError::UnexpectedShape { found: other.describe() }.into()),
	}
}

/// Builds the protocol error for an error status.
pub fn sidecar_error(status: u16, payload: Payload) -> SidecarError {
	let problem = match payload {
		Payload::Json(JsonValue::Object(object)) => Some(ProblemDetails::from_object(object)),
		_ => None,
	};

	SidecarError::new(status, problem)
}
