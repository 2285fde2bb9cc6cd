//! Projection of option records onto the sidecar wire format.
//!
//! [`project_query`] flattens identity context and call overrides into dot-notated query
//! parameters (`optionsOverride.AcquireTokenOptions.Tenant`), while [`project_body`] nests the
//! same overrides as a camelCase JSON object. Both walk the explicit [`WireRecord`] tables, so
//! they agree on which fields exist and both omit every unset or empty field.
//!
//! [`WireRecord`]: crate::options::WireRecord

pub mod body;
pub mod query;

pub use body::*;
pub use query::*;
