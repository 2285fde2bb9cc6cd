//! Redacted wrapper for authorization headers and raw tokens returned by the sidecar.

// self
use crate::_prelude::*;

/// Redacted wrapper keeping authorization headers and raw tokens out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);
impl Secret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Consumes the wrapper and returns the inner value.
	pub fn into_inner(self) -> String {
		self.0
	}

	/// Authorization scheme of a header value, e.g. `Bearer` or `PoP`.
	///
	/// Returns `None` for a bare token or when nothing follows the scheme.
	pub fn scheme(&self) -> Option<&str> {
		self.split_scheme().map(|(scheme, _)| scheme)
	}

	/// Credentials following the scheme of a header value.
	pub fn credentials(&self) -> Option<&str> {
		self.split_scheme().map(|(_, credentials)| credentials)
	}

	/// Returns true when the header uses `scheme`, compared case-insensitively.
	pub fn has_scheme(&self, scheme: &str) -> bool {
		self.scheme().is_some_and(|own| own.eq_ignore_ascii_case(scheme))
	}

	fn split_scheme(&self) -> Option<(&str, &str)> {
		let (scheme, credentials) = self.0.trim().split_once(' ')?;
		let credentials = credentials.trim_start();

		(!credentials.is_empty()).then_some((scheme, credentials))
	}
}
impl AsRef<str> for Secret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
