//! Typed success payloads returned by the sidecar endpoints.

// crates.io
use serde::{Deserializer, de::DeserializeOwned};
// self
use crate::{_prelude::*, auth::Secret, error::ShapeError};

/// Success payload decodable from a sidecar JSON object.
pub trait SidecarPayload
where
	Self: Sized + DeserializeOwned,
{
	/// Wire keys that must be present for the payload to be valid.
	const REQUIRED_FIELDS: &'static [&'static str];

	/// Checks the required keys, then decodes the object.
	fn from_object(object: JsonMap<String, JsonValue>) -> Result<Self, ShapeError> {
		let missing =
			Self::REQUIRED_FIELDS.iter().copied().find(|field| !object.contains_key(*field));

		if let Some(field) = missing {
			return Err(ShapeError::MissingField { field });
		}

		serde_path_to_error::deserialize(JsonValue::Object(object))
			.map_err(|source| ShapeError::Decode { source })
	}
}

/// Result of `/AuthorizationHeader/{apiName}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationHeaderResult {
	/// Ready-to-use `Authorization` header value, e.g. `Bearer eyJ...`.
	pub authorization_header: Secret,
}
impl SidecarPayload for AuthorizationHeaderResult {
	const REQUIRED_FIELDS: &'static [&'static str] = &["authorizationHeader"];
}

/// Result of `/Validate`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ValidateAuthorizationHeaderResult {
	/// Authorization scheme, e.g. `Bearer`.
	pub protocol: String,
	/// Token extracted from the validated header.
	pub token: Secret,
	/// Claims decoded from the token.
	#[serde(default, deserialize_with = "null_as_default")]
	pub claims: JsonMap<String, JsonValue>,
}
impl ValidateAuthorizationHeaderResult {
	/// Returns a claim by name.
	pub fn claim(&self, name: &str) -> Option<&JsonValue> {
		self.claims.get(name)
	}

	/// Returns a string-valued claim by name.
	pub fn claim_str(&self, name: &str) -> Option<&str> {
		self.claim(name).and_then(JsonValue::as_str)
	}
}
impl SidecarPayload for ValidateAuthorizationHeaderResult {
	const REQUIRED_FIELDS: &'static [&'static str] = &["protocol", "token"];
}

/// Result of a downstream call proxied by the sidecar.
///
/// `status_code` is the downstream API's status; a non-2xx value here is still a successful
/// sidecar exchange.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownstreamApiResult {
	/// Status returned by the downstream API.
	pub status_code: u16,
	/// Downstream response headers; each name maps to its values in order.
	#[serde(default, deserialize_with = "deserialize_headers")]
	pub headers: BTreeMap<String, Vec<String>>,
	/// Downstream response content.
	#[serde(default)]
	pub content: DownstreamContent,
}
impl DownstreamApiResult {
	/// Returns true for a 2xx downstream status.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status_code)
	}

	/// First value of a header, compared case-insensitively.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.and_then(|(_, values)| values.first())
			.map(String::as_str)
	}

	/// Decodes the content as JSON into `T`.
	pub fn json<T>(&self) -> Result<T, ShapeError>
	where
		T: DeserializeOwned,
	{
		self.content.json()
	}
}
impl SidecarPayload for DownstreamApiResult {
	const REQUIRED_FIELDS: &'static [&'static str] = &["statusCode"];
}

/// Opaque downstream content.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DownstreamContent {
	/// No content (absent, null, or an empty string).
	#[default]
	Empty,
	/// Textual content, which may itself hold serialized JSON.
	Text(String),
	/// Structured JSON content.
	Json(JsonValue),
}
impl DownstreamContent {
	/// Returns true when there is no content.
	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}

	/// Returns the textual content.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Decodes the content as JSON into `T`, parsing textual content first.
	pub fn json<T>(&self) -> Result<T, ShapeError>
	where
		T: DeserializeOwned,
	{
		match self {
			Self::Empty => Err(ShapeError::UnexpectedShape { found: "an empty body" }),
			Self::Text(text) => {
				let mut de = serde_json::Deserializer::from_str(text);

				serde_path_to_error::deserialize(&mut de)
					.map_err(|source| ShapeError::Decode { source })
			},
			Self::Json(value) => serde_path_to_error::deserialize(value.clone())
				.map_err(|source| ShapeError::Decode { source }),
		}
	}
}
impl<'de> Deserialize<'de> for DownstreamContent {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		Ok(match Option::<JsonValue>::deserialize(deserializer)? {
			None | Some(JsonValue::Null) => Self::Empty,
			Some(JsonValue::String(text)) if text.is_empty() => Self::Empty,
			Some(JsonValue::String(text)) => Self::Text(text),
			Some(other) => Self::Json(other),
		})
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HeaderValues {
	One(String),
	Many(Vec<String>),
}

fn deserialize_headers<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = <Option<BTreeMap<String, HeaderValues>>>::deserialize(deserializer)?;

	Ok(raw
		.unwrap_or_default()
		.into_iter()
		.map(|(name, values)| match values {
			HeaderValues::One(value) => (name, vec![value]),
			HeaderValues::Many(values) => (name, values),
		})
		.collect())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
