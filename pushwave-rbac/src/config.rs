//! Policy configuration.
//!
//! By default the built-in policy table is used as-is. A JSON policy file can
//! register extra permissions, add roles, or replace built-in roles. The file
//! location is taken from the environment so deployments can change policy
//! without a rebuild.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::{RoleCatalog, RoleDefinition};
use crate::error::{RbacError, RbacResult};
use crate::permissions::{Permission, PermissionRegistry};

/// Environment variable naming a JSON policy file.
pub const POLICY_FILE_ENV: &str = "PUSHWAVE_RBAC_POLICY_FILE";

/// Policy configuration.
///
/// # Examples
///
/// ```
/// use pushwave_rbac::config::PolicyConfig;
///
/// let config = PolicyConfig::from_json_str(r#"{
///     "permissions": [
///         {"key": "send_test_push", "resource": "notification", "action": "execute"}
///     ],
///     "roles": [
///         {"name": "qa_tester", "permissions": ["send_test_push", "read_template"]}
///     ]
/// }"#).unwrap();
///
/// assert!(config.include_builtin_roles);
/// assert_eq!(config.roles.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Seed the catalog with the built-in roles before applying `roles`.
    #[serde(default = "default_include_builtin_roles")]
    pub include_builtin_roles: bool,

    /// Permissions registered in addition to the default catalog.
    #[serde(default)]
    pub permissions: Vec<Permission>,

    /// Extra roles. A role with a built-in name replaces the built-in one.
    #[serde(default)]
    pub roles: Vec<RoleDefinition>,
}

fn default_include_builtin_roles() -> bool {
    true
}

impl Default for PolicyConfig {
    /// Built-in roles and the default permission catalog only.
    fn default() -> Self {
        Self {
            include_builtin_roles: true,
            permissions: Vec::new(),
            roles: Vec::new(),
        }
    }
}

impl PolicyConfig {
    /// Parse a JSON policy document.
    pub fn from_json_str(s: &str) -> RbacResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON policy file.
    pub fn from_file(path: impl AsRef<Path>) -> RbacResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| RbacError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Loading RBAC policy file");
        Self::from_json_str(&contents)
    }

    /// Load configuration from the environment.
    ///
    /// Environment variables:
    /// - `PUSHWAVE_RBAC_POLICY_FILE`: path to a JSON policy file (default: built-in policy)
    pub fn from_env() -> RbacResult<Self> {
        match std::env::var(POLICY_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    /// Check that the configuration can produce a usable policy.
    pub fn validate(&self) -> RbacResult<()> {
        if !self.include_builtin_roles && self.roles.is_empty() {
            return Err(RbacError::InvalidPolicy(
                "policy defines no roles and built-in roles are disabled".to_string(),
            ));
        }
        if let Some(perm) = self.permissions.iter().find(|p| p.key.trim().is_empty()) {
            return Err(RbacError::InvalidPolicy(format!(
                "permission for {}:{} has an empty key",
                perm.resource, perm.action
            )));
        }
        Ok(())
    }

    /// Build the permission registry: the default catalog plus `permissions`.
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::DuplicatePermission`] if an extra permission
    /// reuses a registered key.
    pub fn build_registry(&self) -> RbacResult<PermissionRegistry> {
        let mut registry = PermissionRegistry::with_defaults();
        for perm in &self.permissions {
            registry.register(perm.key.clone(), perm.resource, perm.action)?;
        }
        Ok(registry)
    }

    /// Build the role catalog against `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::DuplicateRole`] if `roles` names a role twice.
    pub fn build_catalog(&self, registry: &PermissionRegistry) -> RbacResult<RoleCatalog> {
        let custom = RoleCatalog::from_definitions(registry, &self.roles)?;
        if !self.include_builtin_roles {
            return Ok(custom);
        }

        let mut catalog = RoleCatalog::builtin(registry);
        for def in &self.roles {
            if catalog.upsert(def.build(registry)).is_some() {
                tracing::info!(role = %def.name, "Policy file overrides built-in role");
            }
        }
        Ok(catalog)
    }
}
