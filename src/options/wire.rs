//! Explicit field tables shared by the query and JSON-body projectors.
//!
//! Every option record lists its fields, in a fixed order, together with the query-string name
//! (when the sidecar binds the field from the query) and the JSON-body name. Adding a field to
//! a record does not put it on the wire until it is added to the record's table.

// self
use crate::_prelude::*;

/// Structured record that can be projected onto the sidecar wire format.
pub trait WireRecord
where
	Self: Debug,
{
	/// Returns the record's fields in declaration order.
	fn wire_fields(&self) -> Vec<WireField<'_>>;
}

/// Closed set of value shapes an option field can carry.
#[derive(Clone, Copy, Debug)]
pub enum WireValue<'a> {
	/// Single string value.
	Text(&'a str),
	/// Boolean flag, rendered as `"true"` / `"false"` on the query path.
	Flag(bool),
	/// Ordered list; each entry becomes one repeated query occurrence.
	List(&'a [String]),
	/// String map; only representable in the JSON body.
	Map(&'a BTreeMap<String, String>),
	/// Nested record, prefixed on the query path and nested in the JSON body.
	Record(&'a dyn WireRecord),
}
impl WireValue<'_> {
	/// Returns true for values that carry no data and must be omitted.
	///
	/// Records are never vacant here; projectors drop them when every nested field is absent.
	pub fn is_vacant(&self) -> bool {
		match self {
			Self::Text(value) => value.is_empty(),
			Self::Flag(_) | Self::Record(_) => false,
			Self::List(values) => values.is_empty(),
			Self::Map(entries) => entries.is_empty(),
		}
	}
}

/// One entry of a record's field table.
#[derive(Clone, Copy, Debug)]
pub struct WireField<'a> {
	/// Query-string name, or `None` for JSON-body-only fields.
	pub query: Option<&'static str>,
	/// JSON-body name.
	pub json: &'static str,
	/// Current value; `None` means "use the sidecar default".
	pub value: Option<WireValue<'a>>,
}
impl<'a> WireField<'a> {
	/// Field holding an optional string.
	pub fn text(query: &'static str, json: &'static str, value: &'a Option<String>) -> Self {
		Self { query: Some(query), json, value: value.as_deref().map(WireValue::Text) }
	}

	/// Field holding an optional boolean flag.
	pub fn flag(query: &'static str, json: &'static str, value: Option<bool>) -> Self {
		Self { query: Some(query), json, value: value.map(WireValue::Flag) }
	}

	/// Field holding an optional ordered list.
	pub fn list(query: &'static str, json: &'static str, value: &'a Option<Vec<String>>) -> Self {
		Self { query: Some(query), json, value: value.as_deref().map(WireValue::List) }
	}

	/// Field holding an optional nested record.
	pub fn record<R>(query: &'static str, json: &'static str, value: &'a Option<R>) -> Self
	where
		R: WireRecord,
	{
		Self {
			query: Some(query),
			json,
			value: value.as_ref().map(|record| WireValue::Record(record as &dyn WireRecord)),
		}
	}

	/// JSON-body-only field holding an optional string.
	pub fn body_text(json: &'static str, value: &'a Option<String>) -> Self {
		Self { query: None, json, value: value.as_deref().map(WireValue::Text) }
	}

	/// JSON-body-only field holding an optional string map.
	pub fn body_map(json: &'static str, value: &'a Option<BTreeMap<String, String>>) -> Self {
		Self { query: None, json, value: value.as_ref().map(WireValue::Map) }
	}

	/// Returns the value when it carries data.
	pub fn present(&self) -> Option<WireValue<'a>> {
		self.value.filter(|value| !value.is_vacant())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn vacant_values_cover_empty_shapes() {
		let empty_list: Vec<String> = Vec::new();
		let empty_map = BTreeMap::new();

		assert!(WireValue::Text("").is_vacant());
		assert!(WireValue::List(&empty_list).is_vacant());
		assert!(WireValue::Map(&empty_map).is_vacant());
		assert!(!WireValue::Flag(false).is_vacant());
		assert!(!WireValue::Text("x").is_vacant());
	}

	#[test]
	fn present_filters_unset_and_empty_text() {
		let unset = None;
		let empty = Some(String::new());
		let set = Some("tenant".to_owned());

		assert!(WireField::text("Tenant", "tenant", &unset).present().is_none());
		assert!(WireField::text("Tenant", "tenant", &empty).present().is_none());
		assert!(matches!(
			WireField::text("Tenant", "tenant", &set).present(),
			Some(WireValue::Text("tenant"))
		));
	}
}
