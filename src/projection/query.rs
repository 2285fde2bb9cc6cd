//! Flat, dot-notated query-string projection.

// self
use crate::{
	_prelude::*,
	options::{AgentContext, SidecarCallOptions, WireRecord, WireValue},
};

/// Prefix the sidecar binds call overrides from.
pub const OPTIONS_OVERRIDE_PREFIX: &str = "optionsOverride";

/// Value of one projected query parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
	/// Sent once.
	Single(String),
	/// Sent once per entry, in order, under the same key.
	Repeated(Vec<String>),
}
impl ParamValue {
	/// Returns every value in wire order.
	pub fn values(&self) -> Vec<&str> {
		match self {
			Self::Single(value) => vec![value.as_str()],
			Self::Repeated(values) => values.iter().map(String::as_str).collect(),
		}
	}
}

/// Ordered mapping of wire parameter name to value.
///
/// Insertion order follows the declared field tables, so projecting the same inputs always
/// yields the same sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParameters(Vec<(String, ParamValue)>);
impl QueryParameters {
	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if nothing was projected.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns the value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&ParamValue> {
		self.0.iter().find(|(name, _)| name == key).map(|(_, value)| value)
	}

	/// Returns true if `key` was projected.
	pub fn contains_key(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	/// Iterator over keys in projection order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|(name, _)| name.as_str())
	}

	/// Iterator over `(key, value)` wire pairs, expanding repeated values into one pair each.
	pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().flat_map(|(name, value)| {
			value.values().into_iter().map(move |value| (name.as_str(), value))
		})
	}

	/// Appends every wire pair to the URL's query string.
	pub fn append_to(&self, url: &mut Url) {
		if self.is_empty() {
			return;
		}

		let mut query = url.query_pairs_mut();

		for (key, value) in self.pairs() {
			query.append_pair(key, value);
		}
	}

	fn push(&mut self, key: String, value: ParamValue) {
		self.0.push((key, value));
	}
}

/// Projects identity context and optional call overrides into query parameters.
///
/// Identity fields land at the top level (`AgentIdentity`, `AgentUsername`, `AgentUserId`);
/// overrides land under `optionsOverride.`. Unset and empty fields are omitted, booleans
/// become `"true"` / `"false"`, and each scope becomes its own `optionsOverride.Scopes`
/// occurrence. The projection never fails.
pub fn project_query(
	context: &AgentContext,
	options: Option<&SidecarCallOptions>,
) -> QueryParameters {
	let mut params = QueryParameters::default();

	project_record(&mut params, "", context);

	if let Some(options) = options {
		project_record(&mut params, &format!("{OPTIONS_OVERRIDE_PREFIX}."), options);
	}

	params
}

/// Renders a flag the way the sidecar's query binder parses it.
pub fn flag_literal(flag: bool) -> &'static str {
	if flag { "true" } else { "false" }
}

fn project_record(params: &mut QueryParameters, prefix: &str, record: &dyn WireRecord) {
	for field in record.wire_fields() {
		let Some(name) = field.query else {
			continue;
		};
		let Some(value) = field.present() else {
			continue;
		};
		let key = format!("{prefix}{name}");

		match value {
			WireValue::Text(text) => params.push(key, ParamValue::Single(text.to_owned())),
			WireValue::Flag(flag) =>
				params.push(key, ParamValue::Single(flag_literal(flag).to_owned())),
			WireValue::List(values) => {
				let values = values
					.iter()
					.filter(|value| !value.is_empty())
					.cloned()
					.collect::<Vec<_>>();

				if !values.is_empty() {
					params.push(key, ParamValue::Repeated(values));
				}
			},
			// Maps have no query binding on the sidecar.
			WireValue::Map(_) => {},
			WireValue::Record(nested) => project_record(params, &format!("{key}."), nested),
		}
	}
}
