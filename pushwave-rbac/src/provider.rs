//! Policy provider
//!
//! Owns the permission registry and the current role catalog, and is the
//! object request handlers get injected with. Reads work on an immutable
//! [`PolicySnapshot`]; administrative grants and revokes build a new catalog
//! and swap it in under the write lock, so a reader sees either the old set
//! or the new one and never a half-applied change.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::actions::Action;
use crate::authz::{Authorizer, Decision};
use crate::catalog::RoleCatalog;
use crate::config::PolicyConfig;
use crate::error::{RbacError, RbacResult};
use crate::permissions::PermissionRegistry;
use crate::resources::ResourceType;
use crate::roles::Role;

/// Immutable view of the policy at one revision.
#[derive(Debug, Clone)]
pub struct PolicySnapshot {
    registry: Arc<PermissionRegistry>,
    catalog: Arc<RoleCatalog>,
    revision: u64,
    updated_at: DateTime<Utc>,
}

impl PolicySnapshot {
    /// Authorizer over this snapshot.
    pub fn authorizer(&self) -> Authorizer<'_> {
        Authorizer::new(&self.registry, &self.catalog)
    }

    /// Permission registry.
    pub fn registry(&self) -> &PermissionRegistry {
        &self.registry
    }

    /// Role catalog at this revision.
    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    /// Revision number; starts at 0 and grows by one per effective change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// When this revision was created.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Shared, injectable owner of the authorization policy.
///
/// # Examples
///
/// ```
/// use pushwave_rbac::PolicyProvider;
///
/// let provider = PolicyProvider::builtin();
/// assert!(provider.is_authorized(&["segment_manager"], "delete_segment"));
///
/// provider.revoke("segment_manager", "delete_segment").unwrap();
/// assert!(!provider.is_authorized(&["segment_manager"], "delete_segment"));
/// ```
#[derive(Debug)]
pub struct PolicyProvider {
    current: RwLock<Arc<PolicySnapshot>>,
}

impl PolicyProvider {
    /// Create a provider from a registry and catalog.
    pub fn new(registry: PermissionRegistry, catalog: RoleCatalog) -> Self {
        tracing::info!(
            permissions = registry.len(),
            roles = catalog.len(),
            "RBAC policy loaded"
        );
        Self {
            current: RwLock::new(Arc::new(PolicySnapshot {
                registry: Arc::new(registry),
                catalog: Arc::new(catalog),
                revision: 0,
                updated_at: Utc::now(),
            })),
        }
    }

    /// Create a provider with the default permissions and built-in roles.
    pub fn builtin() -> Self {
        let registry = PermissionRegistry::with_defaults();
        let catalog = RoleCatalog::builtin(&registry);
        Self::new(registry, catalog)
    }

    /// Create a provider from configuration.
    ///
    /// # Errors
    ///
    /// Any error building the registry or catalog; these indicate a broken
    /// policy and should stop startup.
    pub fn from_config(config: &PolicyConfig) -> RbacResult<Self> {
        config.validate()?;
        let registry = config.build_registry()?;
        let catalog = config.build_catalog(&registry)?;
        Ok(Self::new(registry, catalog))
    }

    /// Current policy snapshot.
    ///
    /// Holding a snapshot does not block writers; it simply keeps the old
    /// revision alive.
    pub fn snapshot(&self) -> Arc<PolicySnapshot> {
        Arc::clone(&self.current.read())
    }

    /// See [`Authorizer::decide`].
    pub fn decide<S: AsRef<str>>(&self, role_names: &[S], key: &str) -> Decision {
        self.snapshot().authorizer().decide(role_names, key)
    }

    /// See [`Authorizer::is_authorized`].
    pub fn is_authorized<S: AsRef<str>>(&self, role_names: &[S], key: &str) -> bool {
        self.snapshot().authorizer().is_authorized(role_names, key)
    }

    /// See [`Authorizer::is_authorized_any`].
    pub fn is_authorized_any<S, K>(&self, role_names: &[S], keys: &[K]) -> bool
    where
        S: AsRef<str>,
        K: AsRef<str>,
    {
        self.snapshot().authorizer().is_authorized_any(role_names, keys)
    }

    /// See [`Authorizer::is_authorized_all`].
    pub fn is_authorized_all<S, K>(&self, role_names: &[S], keys: &[K]) -> bool
    where
        S: AsRef<str>,
        K: AsRef<str>,
    {
        self.snapshot().authorizer().is_authorized_all(role_names, keys)
    }

    /// See [`Authorizer::is_authorized_for`].
    pub fn is_authorized_for<S: AsRef<str>>(
        &self,
        role_names: &[S],
        resource: ResourceType,
        action: Action,
    ) -> bool {
        self.snapshot()
            .authorizer()
            .is_authorized_for(role_names, resource, action)
    }

    /// Owned copy of [`Authorizer::effective_permissions`].
    pub fn effective_permissions<S: AsRef<str>>(&self, role_names: &[S]) -> BTreeSet<String> {
        self.snapshot()
            .authorizer()
            .effective_permissions(role_names)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Grant `key` to `role`.
    ///
    /// Unregistered keys are ignored, like [`crate::Role::add_permission`].
    ///
    /// # Returns
    ///
    /// `true` if the role's permission set changed
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::UnknownRole`] if `role` is not in the catalog.
    pub fn grant(&self, role: &str, key: &str) -> RbacResult<bool> {
        self.mutate(role, key, "granted", |registry, r| r.add_permission(registry, key))
    }

    /// Revoke `key` from `role`.
    ///
    /// # Returns
    ///
    /// `true` if the role held the key
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::UnknownRole`] if `role` is not in the catalog.
    pub fn revoke(&self, role: &str, key: &str) -> RbacResult<bool> {
        self.mutate(role, key, "revoked", |_, r| r.remove_permission(key))
    }

    fn mutate<F>(&self, role: &str, key: &str, verb: &'static str, apply: F) -> RbacResult<bool>
    where
        F: FnOnce(&PermissionRegistry, &mut Role) -> bool,
    {
        let mut current = self.current.write();
        if !current.catalog.contains(role) {
            return Err(RbacError::UnknownRole(role.to_string()));
        }

        let mut catalog = RoleCatalog::clone(&current.catalog);
        let changed = match catalog.get_mut(role) {
            Some(r) => apply(current.registry.as_ref(), r),
            None => false,
        };
        if !changed {
            return Ok(false);
        }

        let next = PolicySnapshot {
            registry: Arc::clone(&current.registry),
            catalog: Arc::new(catalog),
            revision: current.revision + 1,
            updated_at: Utc::now(),
        };
        tracing::info!(
            role = %role,
            permission = %key,
            revision = next.revision,
            "Permission {}", verb
        );
        *current = Arc::new(next);
        Ok(true)
    }
}

impl Default for PolicyProvider {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_provider() {
        let provider = PolicyProvider::builtin();
        let snapshot = provider.snapshot();
        assert_eq!(snapshot.revision(), 0);
        assert_eq!(snapshot.catalog().len(), 7);
        assert_eq!(snapshot.registry().len(), 71);
        assert!(provider.is_authorized(&["analytics_specialist"], "export_analytics"));
    }

    #[test]
    fn test_grant_and_revoke_bump_revision() {
        let provider = PolicyProvider::builtin();

        assert!(!provider.is_authorized(&["content_editor"], "publish_template"));
        assert!(provider.grant("content_editor", "publish_template").unwrap());
        assert!(provider.is_authorized(&["content_editor"], "publish_template"));
        assert_eq!(provider.snapshot().revision(), 1);

        assert!(provider.revoke("content_editor", "publish_template").unwrap());
        assert!(!provider.is_authorized(&["content_editor"], "publish_template"));
        assert_eq!(provider.snapshot().revision(), 2);
    }

    #[test]
    fn test_noop_mutations_keep_revision() {
        let provider = PolicyProvider::builtin();

        assert!(!provider.grant("content_editor", "create_template").unwrap());
        assert!(!provider.grant("content_editor", "nonexistent_key").unwrap());
        assert!(!provider.revoke("content_editor", "delete_user").unwrap());
        assert_eq!(provider.snapshot().revision(), 0);
    }

    #[test]
    fn test_unknown_role_mutation_is_error() {
        let provider = PolicyProvider::builtin();
        let err = provider.grant("intern", "read_user").unwrap_err();
        assert!(matches!(err, RbacError::UnknownRole(ref r) if r == "intern"));
        assert!(provider.revoke("intern", "read_user").is_err());
    }

    #[test]
    fn test_old_snapshot_is_unchanged_by_mutation() {
        let provider = PolicyProvider::builtin();
        let before = provider.snapshot();

        provider.revoke("segment_manager", "delete_segment").unwrap();

        assert!(before
            .authorizer()
            .is_authorized(&["segment_manager"], "delete_segment"));
        assert!(!provider.is_authorized(&["segment_manager"], "delete_segment"));
    }

    #[test]
    fn test_from_config() {
        let config = PolicyConfig::from_json_str(
            r#"{"roles": [{"name": "auditor", "permissions": ["read_user", "list_role"]}]}"#,
        )
        .unwrap();
        let provider = PolicyProvider::from_config(&config).unwrap();

        assert!(provider.is_authorized(&["auditor"], "list_role"));
        assert!(provider.is_authorized(&["system_administrator"], "list_role"));
        assert_eq!(
            provider.effective_permissions(&["auditor"]).into_iter().collect::<Vec<_>>(),
            vec!["list_role".to_string(), "read_user".to_string()]
        );
    }

    #[test]
    fn test_provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PolicyProvider>();
        assert_send_sync::<PolicySnapshot>();
    }
}
