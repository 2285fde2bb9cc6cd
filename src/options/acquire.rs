//! Token-acquisition overrides forwarded to the sidecar.

// self
use crate::{
	_prelude::*,
	options::{WireField, WireRecord},
};

/// Managed identity override.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManagedIdentityOptions {
	/// Client id of a user-assigned managed identity; unset selects the system-assigned one.
	pub user_assigned_client_id: Option<String>,
}
impl ManagedIdentityOptions {
	/// Targets the user-assigned managed identity with the given client id.
	pub fn user_assigned(client_id: impl Into<String>) -> Self {
		Self { user_assigned_client_id: Some(client_id.into()) }
	}
}
impl WireRecord for ManagedIdentityOptions {
	fn wire_fields(&self) -> Vec<WireField<'_>> {
		vec![WireField::text(
			"UserAssignedClientId",
			"userAssignedClientId",
			&self.user_assigned_client_id,
		)]
	}
}

/// Overrides applied when the sidecar acquires the token for a call.
///
/// Every field is optional and an unset field leaves the sidecar's configured default in
/// place. The last four fields only travel in JSON bodies; the sidecar binds no query
/// parameter for them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AcquireTokenOptions {
	/// Tenant to acquire the token in.
	pub tenant: Option<String>,
	/// Bypass the sidecar's token cache.
	pub force_refresh: Option<bool>,
	/// Claims challenge returned by a resource.
	pub claims: Option<String>,
	/// Correlation id (a GUID) propagated to the identity provider.
	pub correlation_id: Option<String>,
	/// Session key for long-running on-behalf-of processes.
	pub long_running_web_api_session_key: Option<String>,
	/// Federated managed identity path.
	pub fmi_path: Option<String>,
	/// Public key for proof-of-possession tokens.
	pub pop_public_key: Option<String>,
	/// Managed identity selection.
	pub managed_identity: Option<ManagedIdentityOptions>,
	/// Named authentication scheme configured on the sidecar.
	pub authentication_options_name: Option<String>,
	/// Claim bound into proof-of-possession tokens.
	pub pop_claim: Option<String>,
	/// B2C user flow.
	pub user_flow: Option<String>,
	/// Extra query parameters sent to the token endpoint.
	pub extra_query_parameters: Option<BTreeMap<String, String>>,
}
impl AcquireTokenOptions {
	/// Sets the tenant override.
	pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
		self.tenant = Some(tenant.into());

		self
	}

	/// Sets the force-refresh flag.
	pub fn with_force_refresh(mut self, force: bool) -> Self {
		self.force_refresh = Some(force);

		self
	}

	/// Sets the claims challenge.
	pub fn with_claims(mut self, claims: impl Into<String>) -> Self {
		self.claims = Some(claims.into());

		self
	}

	/// Sets the correlation id.
	pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
		self.correlation_id = Some(correlation_id.into());

		self
	}

	/// Sets the long-running session key.
	pub fn with_long_running_web_api_session_key(mut self, key: impl Into<String>) -> Self {
		self.long_running_web_api_session_key = Some(key.into());

		self
	}

	/// Sets the FMI path.
	pub fn with_fmi_path(mut self, path: impl Into<String>) -> Self {
		self.fmi_path = Some(path.into());

		self
	}

	/// Sets the proof-of-possession public key.
	pub fn with_pop_public_key(mut self, key: impl Into<String>) -> Self {
		self.pop_public_key = Some(key.into());

		self
	}

	/// Sets the managed identity selection.
	pub fn with_managed_identity(mut self, managed_identity: ManagedIdentityOptions) -> Self {
		self.managed_identity = Some(managed_identity);

		self
	}

	/// Sets the authentication options name.
	pub fn with_authentication_options_name(mut self, name: impl Into<String>) -> Self {
		self.authentication_options_name = Some(name.into());

		self
	}

	/// Sets the proof-of-possession claim.
	pub fn with_pop_claim(mut self, claim: impl Into<String>) -> Self {
		self.pop_claim = Some(claim.into());

		self
	}

	/// Sets the user flow.
	pub fn with_user_flow(mut self, user_flow: impl Into<String>) -> Self {
		self.user_flow = Some(user_flow.into());

		self
	}

	/// Adds one extra token-endpoint query parameter.
	pub fn with_extra_query_parameter(
		mut self,
		key: impl Into<String>,
		value: impl Into<String>,
	) -> Self {
		self.extra_query_parameters
			.get_or_insert_with(BTreeMap::new)
			.insert(key.into(), value.into());

		self
	}
}
impl WireRecord for AcquireTokenOptions {
	fn wire_fields(&self) -> Vec<WireField<'_>> {
		vec![
			WireField::text("Tenant", "tenant", &self.tenant),
			WireField::flag("ForceRefresh", "forceRefresh", self.force_refresh),
			WireField::text("Claims", "claims", &self.claims),
			WireField::text("CorrelationId", "correlationId", &self.correlation_id),
			WireField::text(
				"LongRunningWebApiSessionKey",
				"longRunningWebApiSessionKey",
				&self.long_running_web_api_session_key,
			),
			WireField::text("FmiPath", "fmiPath", &self.fmi_path),
			WireField::text("PopPublicKey", "popPublicKey", &self.pop_public_key),
			WireField::record("ManagedIdentity", "managedIdentity", &self.managed_identity),
			WireField::body_text("authenticationOptionsName", &self.authentication_options_name),
			WireField::body_text("popClaim", &self.pop_claim),
			WireField::body_text("userFlow", &self.user_flow),
			WireField::body_map("extraQueryParameters", &self.extra_query_parameters),
		]
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builders_populate_fields() {
		let options = AcquireTokenOptions::default()
			.with_tenant("contoso")
			.with_force_refresh(false)
			.with_managed_identity(ManagedIdentityOptions::user_assigned("mi-client"))
			.with_extra_query_parameter("dc", "ESTS-PUB-WUS2");

		assert_eq!(options.tenant.as_deref(), Some("contoso"));
		assert_eq!(options.force_refresh, Some(false));
		assert_eq!(
			options.managed_identity.and_then(|mi| mi.user_assigned_client_id).as_deref(),
			Some("mi-client")
		);
		assert_eq!(
			options.extra_query_parameters.and_then(|mut map| map.remove("dc")).as_deref(),
			Some("ESTS-PUB-WUS2")
		);
	}

	#[test]
	fn field_table_marks_body_only_fields() {
		let options = AcquireTokenOptions::default();
		let fields = options.wire_fields();
		let body_only =
			fields.iter().filter(|field| field.query.is_none()).map(|field| field.json);

		assert_eq!(
			body_only.collect::<Vec<_>>(),
			vec!["authenticationOptionsName", "popClaim", "userFlow", "extraQueryParameters"]
		);
		assert!(fields.iter().all(|field| field.value.is_none()));
	}
}
