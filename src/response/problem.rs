//! RFC 7807 problem payloads returned by the sidecar on errors.

// self
use crate::_prelude::*;

/// Structured error payload (`application/problem+json`).
///
/// Known members are lifted into typed fields; every other member (and any known member whose
/// value has an unexpected JSON type) is preserved in [`extensions`](Self::extensions).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "JsonMap<String, JsonValue>")]
pub struct ProblemDetails {
	/// URI reference identifying the problem type.
	pub type_uri: Option<String>,
	/// Short human-readable summary.
	pub title: Option<String>,
	/// HTTP status code echoed by the server.
	pub status: Option<u16>,
	/// Human-readable explanation of this occurrence.
	pub detail: Option<String>,
	/// URI reference identifying this occurrence.
	pub instance: Option<String>,
	/// Unrecognized members.
	pub extensions: BTreeMap<String, JsonValue>,
}
impl ProblemDetails {
	/// Builds problem details from a decoded JSON object.
	pub fn from_object(object: JsonMap<String, JsonValue>) -> Self {
		let mut problem = Self::default();

		for (key, value) in object {
			let slot = match key.as_str() {
				"type" => &mut problem.type_uri,
				"title" => &mut problem.title,
				"detail" => &mut problem.detail,
				"instance" => &mut problem.instance,
				"status" => {
					match value.as_u64().and_then(|code| u16::try_from(code).ok()) {
						Some(code) => problem.status = Some(code),
						None if value.is_null() => {},
						None => {
							problem.extensions.insert(key, value);
						},
					}

					continue;
				},
				_ => {
					problem.extensions.insert(key, value);

					continue;
				},
			};

			match value {
				JsonValue::String(text) => *slot = Some(text),
				JsonValue::Null => {},
				other => {
					problem.extensions.insert(key, other);
				},
			}
		}

		problem
	}

	/// Message to surface for this problem: `detail`, else `title`, skipping empty strings.
	pub fn summary(&self) -> Option<&str> {
		[self.detail.as_deref(), self.title.as_deref()]
			.into_iter()
			.flatten()
			.find(|text| !text.is_empty())
	}

	/// Returns an extension member by name.
	pub fn extension(&self, name: &str) -> Option<&JsonValue> {
		self.extensions.get(name)
	}
}
impl From<JsonMap<String, JsonValue>> for ProblemDetails {
	fn from(object: JsonMap<String, JsonValue>) -> Self {
		Self::from_object(object)
	}
}
