//! Caller identity context telling the sidecar which identity to act as.

// self
use crate::{
	_prelude::*,
	options::{WireField, WireRecord},
};

/// Agent identity, delegated username, and delegated user object id for a call.
///
/// Empty strings count as unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentContext {
	/// Configured agent identity (client id of the agent).
	pub agent_identity: Option<String>,
	/// User principal name of the delegated agent user.
	pub agent_username: Option<String>,
	/// Object id of the delegated agent user.
	pub agent_user_id: Option<String>,
}
impl AgentContext {
	/// Sets the agent identity.
	pub fn with_agent_identity(mut self, agent_identity: impl Into<String>) -> Self {
		self.agent_identity = Some(agent_identity.into());

		self
	}

	/// Sets the agent username.
	pub fn with_agent_username(mut self, agent_username: impl Into<String>) -> Self {
		self.agent_username = Some(agent_username.into());

		self
	}

	/// Sets the agent user id.
	pub fn with_agent_user_id(mut self, agent_user_id: impl Into<String>) -> Self {
		self.agent_user_id = Some(agent_user_id.into());

		self
	}

	/// Returns true when no field carries a value.
	pub fn is_empty(&self) -> bool {
		[&self.agent_identity, &self.agent_username, &self.agent_user_id]
			.into_iter()
			.all(|field| field.as_deref().is_none_or(str::is_empty))
	}

	/// Layers `self` over `defaults`, field by field.
	pub fn or_defaults(&self, defaults: &AgentContext) -> AgentContext {
		fn pick(value: &Option<String>, fallback: &Option<String>) -> Option<String> {
			value.as_ref().filter(|v| !v.is_empty()).or(fallback.as_ref()).cloned()
		}

		AgentContext {
			agent_identity: pick(&self.agent_identity, &defaults.agent_identity),
			agent_username: pick(&self.agent_username, &defaults.agent_username),
			agent_user_id: pick(&self.agent_user_id, &defaults.agent_user_id),
		}
	}
}
impl WireRecord for AgentContext {
	fn wire_fields(&self) -> Vec<WireField<'_>> {
		vec![
			WireField::text("AgentIdentity", "agentIdentity", &self.agent_identity),
			WireField::text("AgentUsername", "agentUsername", &self.agent_username),
			WireField::text("AgentUserId", "agentUserId", &self.agent_user_id),
		]
	}
}
