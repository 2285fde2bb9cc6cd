//! Client configuration: sidecar location, timeout, TLS posture, default headers, and default
//! identity context.

// crates.io
use http::header::AUTHORIZATION;
// self
use crate::{_prelude::*, error::ConfigError, options::AgentContext};

/// Sidecar address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://localhost:7255";
/// Timeout applied to every request when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Media type exchanged with the sidecar.
pub const APPLICATION_JSON: &str = "application/json";

/// Certificate verification policy toward the sidecar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TlsVerification {
	/// Verify the sidecar certificate chain.
	#[default]
	Verify,
	/// Accept any certificate. Only for local development against self-signed sidecars.
	DangerAcceptInvalidCertificates,
}
impl TlsVerification {
	/// Returns true when certificate checks are disabled.
	pub fn is_insecure(self) -> bool {
		matches!(self, Self::DangerAcceptInvalidCertificates)
	}
}

/// Validated client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSidecarConfig")]
pub struct SidecarConfig {
	base_url: Url,
	timeout: Duration,
	default_headers: HeaderMap,
	tls: TlsVerification,
	agent: AgentContext,
}
impl SidecarConfig {
	/// Starts a builder seeded with the defaults.
	pub fn builder() -> SidecarConfigBuilder {
		SidecarConfigBuilder::default()
	}

	/// Development configuration for a sidecar on `localhost` with a self-signed certificate.
	pub fn insecure_localhost(port: u16) -> Result<Self, ConfigError> {
		let raw = format!("https://localhost:{port}");
		let base_url = Url::parse(&raw).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		Self::builder()
			.base_url(base_url)
			.tls(TlsVerification::DangerAcceptInvalidCertificates)
			.build()
	}

	/// Sidecar base URL.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Timeout applied to every request.
	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	/// Configured default headers.
	pub fn default_headers(&self) -> &HeaderMap {
		&self.default_headers
	}

	/// TLS verification policy.
	pub fn tls(&self) -> TlsVerification {
		self.tls
	}

	/// Identity context applied when a call leaves a field unset.
	pub fn agent(&self) -> &AgentContext {
		&self.agent
	}

	/// Builds the absolute URL for a sidecar route.
	pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ConfigError> {
		endpoint_url(&self.base_url, segments)
	}
}
impl TryFrom<RawSidecarConfig> for SidecarConfig {
	type Error = ConfigError;

	fn try_from(raw: RawSidecarConfig) -> Result<Self, Self::Error> {
		let base_url = Url::parse(&raw.base_url)
			.map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		SidecarConfigBuilder::default()
			.base_url(base_url)
			.timeout(Duration::from_secs(raw.timeout_secs))
			.default_headers(raw.default_headers)
			.tls(raw.tls)
			.agent(raw.agent)
			.build()
	}
}

/// Builder for [`SidecarConfig`] values.
#[derive(Clone, Debug)]
pub struct SidecarConfigBuilder {
	/// Sidecar base URL; [`DEFAULT_BASE_URL`] when unset.
	pub base_url: Option<Url>,
	/// Timeout applied to every request.
	pub timeout: Duration,
	/// Default headers in insertion order; a later entry wins over an earlier one with the same
	/// case-insensitive name.
	pub default_headers: Vec<(String, String)>,
	/// TLS verification policy.
	pub tls: TlsVerification,
	/// Default identity context.
	pub agent: AgentContext,
}
impl SidecarConfigBuilder {
	/// Sets the sidecar base URL.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Sets the request timeout.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Adds one default header, replacing an earlier one with the same name.
	pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.default_headers.push((name.into(), value.into()));

		self
	}

	/// Adds multiple default headers.
	pub fn default_headers<I, K, V>(mut self, headers: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.default_headers
			.extend(headers.into_iter().map(|(name, value)| (name.into(), value.into())));

		self
	}

	/// Sets the TLS verification policy.
	pub fn tls(mut self, tls: TlsVerification) -> Self {
		self.tls = tls;

		self
	}

	/// Sets the default identity context.
	pub fn agent(mut self, agent: AgentContext) -> Self {
		self.agent = agent;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<SidecarConfig, ConfigError> {
		let base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(DEFAULT_BASE_URL)
				.map_err(|source| ConfigError::InvalidBaseUrl { source })?,
		};

		validate_base_url(&base_url)?;

		if self.timeout.is_zero() {
			return Err(ConfigError::ZeroTimeout);
		}

		let mut default_headers = HeaderMap::new();

		for (raw_name, raw_value) in &self.default_headers {
			if raw_name.eq_ignore_ascii_case(AUTHORIZATION.as_str()) {
				return Err(ConfigError::AuthorizationDefaultHeader);
			}

			let (name, value) = parse_header(raw_name, raw_value)
				.ok_or_else(|| ConfigError::InvalidDefaultHeader { name: raw_name.clone() })?;

			default_headers.insert(name, value);
		}

		Ok(SidecarConfig {
			base_url,
			timeout: self.timeout,
			default_headers,
			tls: self.tls,
			agent: self.agent,
		})
	}
}
impl Default for SidecarConfigBuilder {
	fn default() -> Self {
		Self {
			base_url: None,
			timeout: DEFAULT_TIMEOUT,
			default_headers: Vec::new(),
			tls: TlsVerification::default(),
			agent: AgentContext::default(),
		}
	}
}

#[derive(Deserialize)]
#[serde(default)]
struct RawSidecarConfig {
	base_url: String,
	timeout_secs: u64,
	default_headers: BTreeMap<String, String>,
	tls: TlsVerification,
	agent: AgentContext,
}
impl Default for RawSidecarConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_owned(),
			timeout_secs: DEFAULT_TIMEOUT.as_secs(),
			default_headers: BTreeMap::new(),
			tls: TlsVerification::default(),
			agent: AgentContext::default(),
		}
	}
}

/// Joins route `segments` onto `base`, keeping exactly one `/` between path parts.
///
/// Any run of trailing slashes on the base collapses into that single separator. Each segment
/// is percent-encoded as a single path segment, so an API name containing `/` cannot escape
/// its route. Query and fragment of the base are dropped.
pub fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url, ConfigError> {
	let mut url = base.clone();
	url.set_path(base.path().trim_end_matches('/'));
	url.set_query(None);
	url.set_fragment(None);

	{
		let mut path = url
			.path_segments_mut()
			.map_err(|_| ConfigError::CannotBeABase { url: base.to_string() })?;

		path.pop_if_empty();

		for segment in segments {
			path.push(segment);
		}
	}

	Ok(url)
}

/// Parses a caller-supplied header pair, returning `None` when either half cannot be sent.
pub fn parse_header(name: &str, value: &str) -> Option<(HeaderName, HeaderValue)> {
	let name = HeaderName::from_bytes(name.as_bytes()).ok()?;
	let value = HeaderValue::from_str(value).ok()?;

	Some((name, value))
}

fn validate_base_url(url: &Url) -> Result<(), ConfigError> {
	if !matches!(url.scheme(), "http" | "https") {
		return Err(ConfigError::UnsupportedScheme { scheme: url.scheme().to_owned() });
	}
	if url.cannot_be_a_base() {
		return Err(ConfigError::CannotBeABase { url: url.to_string() });
	}

	Ok(())
}
