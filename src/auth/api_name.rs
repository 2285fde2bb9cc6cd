//! Downstream API names used as sidecar route segments.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::{_prelude::*, error::UsageError};

/// Name of a downstream API configured on the sidecar.
///
/// The name becomes a single route segment (`/AuthorizationHeader/{apiName}`), so it is
/// percent-encoded on the wire and must contain at least one non-whitespace character.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiName(String);
impl ApiName {
	/// Creates a new API name after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, UsageError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Returns the raw name.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Deref for ApiName {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for ApiName {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for ApiName {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<ApiName> for String {
	fn from(value: ApiName) -> Self {
		value.0
	}
}
impl TryFrom<String> for ApiName {
	type Error = UsageError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Debug for ApiName {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "ApiName({})", self.0)
	}
}
impl Display for ApiName {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for ApiName {
	type Err = UsageError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate_view(view: &str) -> Result<(), UsageError> {
	if view.trim().is_empty() {
		return Err(UsageError::EmptyApiName);
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn api_names_reject_blank_input() {
		assert!(matches!(ApiName::new(""), Err(UsageError::EmptyApiName)));
		assert!(matches!(ApiName::new("   "), Err(UsageError::EmptyApiName)));

		let name = ApiName::new("graph").expect("Plain API name should be valid.");

		assert_eq!(name.as_str(), "graph");
		assert_eq!(format!("{name:?}"), "ApiName(graph)");
	}

	#[test]
	fn serde_enforces_validation() {
		let name: ApiName =
			serde_json::from_str("\"MyDownstreamApi\"").expect("API name should deserialize.");

		assert_eq!(&*name, "MyDownstreamApi");
		assert!(serde_json::from_str::<ApiName>("\"\"").is_err());
	}
}
