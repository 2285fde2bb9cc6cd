//! Per-call inputs shared by every API-scoped sidecar operation.

// self
use crate::{
	_prelude::*,
	options::{AgentContext, SidecarCallOptions},
};

/// Target API, identity context, overrides, and extra headers for one sidecar request.
///
/// The API name is validated when the call is issued, so an empty name surfaces as a usage
/// error from the operation instead of from this builder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidecarCall {
	/// Name of the downstream API configured on the sidecar.
	pub api_name: String,
	/// Identity context; unset fields fall back to the client's configured context.
	pub context: AgentContext,
	/// Overrides of the sidecar's configuration for this API.
	pub options: Option<SidecarCallOptions>,
	/// Extra request headers; they override default headers with the same name.
	pub headers: Vec<(String, String)>,
}
impl SidecarCall {
	/// Creates a call targeting `api_name`.
	pub fn new(api_name: impl Into<String>) -> Self {
		Self { api_name: api_name.into(), ..Default::default() }
	}

	/// Replaces the identity context.
	pub fn with_context(mut self, context: AgentContext) -> Self {
		self.context = context;

		self
	}

	/// Sets the agent identity.
	pub fn with_agent_identity(mut self, agent_identity: impl Into<String>) -> Self {
		self.context.agent_identity = Some(agent_identity.into());

		self
	}

	/// Sets the delegated agent username.
	pub fn with_agent_username(mut self, agent_username: impl Into<String>) -> Self {
		self.context.agent_username = Some(agent_username.into());

		self
	}

	/// Sets the delegated agent user object id.
	pub fn with_agent_user_id(mut self, agent_user_id: impl Into<String>) -> Self {
		self.context.agent_user_id = Some(agent_user_id.into());

		self
	}

	/// Sets the option overrides.
	pub fn with_options(mut self, options: SidecarCallOptions) -> Self {
		self.options = Some(options);

		self
	}

	/// Adds one extra request header.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}
}
impl From<&str> for SidecarCall {
	fn from(api_name: &str) -> Self {
		Self::new(api_name)
	}
}
impl From<String> for SidecarCall {
	fn from(api_name: String) -> Self {
		Self::new(api_name)
	}
}
