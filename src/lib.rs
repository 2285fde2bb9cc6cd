//! Typed client for identity sidecars: project call overrides onto the sidecar's wire format,
//! parse RFC 7807 problems back into domain errors, and keep transport failures apart from
//! well-formed rejections.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod options;
pub mod projection;
pub mod response;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::SidecarClient,
		config::{SidecarConfig, TlsVerification},
		http::ReqwestHttpClient,
	};

	/// Sidecar client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = SidecarClient<ReqwestHttpClient>;

	/// Builds a configuration pointing at `base_url` that accepts the self-signed certificates
	/// produced by `httpmock` during tests.
	pub fn test_config(base_url: &str) -> SidecarConfig {
		SidecarConfig::builder()
			.base_url(Url::parse(base_url).expect("Failed to parse mock sidecar base URL."))
			.tls(TlsVerification::DangerAcceptInvalidCertificates)
			.timeout(std::time::Duration::from_secs(5))
			.build()
			.expect("Failed to build sidecar configuration for tests.")
	}

	/// Constructs a [`SidecarClient`] that owns an insecure reqwest transport pointed at
	/// `base_url`.
	pub fn build_reqwest_test_client(base_url: &str) -> ReqwestTestClient {
		SidecarClient::new(test_config(base_url))
			.expect("Failed to build insecure sidecar client for tests.")
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration,
	};

	pub use http::{HeaderMap, HeaderName, HeaderValue};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value as JsonValue};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _, parking_lot as _};
