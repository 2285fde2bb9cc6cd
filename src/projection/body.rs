//! Nested JSON-body projection.

// self
use crate::{
	_prelude::*,
	options::{SidecarCallOptions, WireRecord, WireValue},
};

/// Serializes call overrides into the camelCase JSON object the sidecar binds from bodies.
///
/// Unset and empty fields are dropped at every nesting level, and a nested record whose
/// fields are all absent is dropped as well, so `SidecarCallOptions::default()` yields `{}`.
pub fn project_body(options: &SidecarCallOptions) -> JsonMap<String, JsonValue> {
	record_to_map(options)
}

/// Converts any wire record into a JSON object using its field table.
pub fn record_to_map(record: &dyn WireRecord) -> JsonMap<String, JsonValue> {
	let mut map = JsonMap::new();

	for field in record.wire_fields() {
		if let Some(value) = field.present().and_then(value_to_json) {
			map.insert(field.json.to_owned(), value);
		}
	}

	map
}

fn value_to_json(value: WireValue<'_>) -> Option<JsonValue> {
	match value {
		WireValue::Text(text) => Some(JsonValue::String(text.to_owned())),
		WireValue::Flag(flag) => Some(JsonValue::Bool(flag)),
		WireValue::List(values) => {
			let values = values
				.iter()
				.filter(|value| !value.is_empty())
				.map(|value| JsonValue::String(value.clone()))
				.collect::<Vec<_>>();

			(!values.is_empty()).then_some(JsonValue::Array(values))
		},
		WireValue::Map(entries) => Some(JsonValue::Object(
			entries
				.iter()
				.map(|(key, value)| (key.clone(), JsonValue::String(value.clone())))
				.collect(),
		)),
		WireValue::Record(nested) => {
			let map = record_to_map(nested);

			(!map.is_empty()).then_some(JsonValue::Object(map))
		},
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::options::{AcquireTokenOptions, DownstreamApiOptions, ManagedIdentityOptions};

	#[test]
	fn default_options_serialize_to_empty_object() {
		assert!(project_body(&SidecarCallOptions::default()).is_empty());
	}

	#[test]
	fn nested_records_drop_unset_fields_at_every_level() {
		let options = SidecarCallOptions::default()
			.with_scopes(["api://x/.default"])
			.with_request_app_token(false)
			.with_relative_path("/v1/data")
			.with_acquire_token_options(
				AcquireTokenOptions::default()
					.with_tenant("contoso")
					.with_managed_identity(ManagedIdentityOptions::default()),
			);
		let body = JsonValue::Object(project_body(&options));

		assert_eq!(
			body,
			json!({
				"scopes": ["api://x/.default"],
				"requestAppToken": false,
				"relativePath": "/v1/data",
				"acquireTokenOptions": { "tenant": "contoso" }
			})
		);
	}

	#[test]
	fn empty_nested_record_is_omitted() {
		let options = SidecarCallOptions::default()
			.with_acquire_token_options(AcquireTokenOptions::default().with_claims(""));

		assert!(project_body(&options).is_empty());
	}

	#[test]
	fn body_only_fields_are_serialized() {
		let options = SidecarCallOptions::default()
			.with_protocol_scheme("Bearer")
			.with_extra_header("x-ms-client", "sidecar")
			.with_acquire_token_options(
				AcquireTokenOptions::default()
					.with_pop_claim("claim")
					.with_extra_query_parameter("slice", "testslice"),
			);
		let body = JsonValue::Object(project_body(&options));

		assert_eq!(
			body,
			json!({
				"protocolScheme": "Bearer",
				"extraHeaderParameters": { "x-ms-client": "sidecar" },
				"acquireTokenOptions": {
					"popClaim": "claim",
					"extraQueryParameters": { "slice": "testslice" }
				}
			})
		);
	}

	#[test]
	fn body_deserializes_back_into_equal_options() {
		let options = SidecarCallOptions::default()
			.with_scopes(["a", "b"])
			.with_http_method("Post")
			.with_acquire_token_options(
				AcquireTokenOptions::default()
					.with_force_refresh(true)
					.with_managed_identity(ManagedIdentityOptions::user_assigned("mi")),
			);
		let decoded: DownstreamApiOptions =
			serde_json::from_value(JsonValue::Object(project_body(&options)))
				.expect("Projected body should deserialize into options.");

		assert_eq!(decoded, options);
	}
}
