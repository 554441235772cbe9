//! Roles
//!
//! A role is a named, described set of permission keys. Membership is checked
//! against a [`PermissionRegistry`] whenever keys are added, so a role can
//! never hold a key the registry doesn't know.

use serde::Serialize;
use std::collections::HashSet;

use crate::permissions::PermissionRegistry;

/// A named bundle of permission keys.
///
/// Keys that are not registered are dropped silently, both at construction
/// and in [`Role::add_permission`].
///
/// # Examples
///
/// ```
/// use pushwave_rbac::{PermissionRegistry, Role};
///
/// let registry = PermissionRegistry::with_defaults();
/// let mut role = Role::new(
///     "reviewer",
///     "Reviews campaigns before launch",
///     ["read_campaign", "approve_campaign", "not_a_permission"],
///     &registry,
/// );
///
/// assert!(role.has_permission("approve_campaign"));
/// assert!(!role.has_permission("not_a_permission"));
/// assert_eq!(role.len(), 2);
///
/// assert!(role.add_permission(&registry, "list_campaign"));
/// assert!(role.remove_permission("approve_campaign"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    name: String,
    description: String,
    permissions: HashSet<String>,
}

impl Role {
    /// Create a role, keeping only the initial keys present in `registry`.
    pub fn new<I, S>(
        name: impl Into<String>,
        description: impl Into<String>,
        initial: I,
        registry: &PermissionRegistry,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let mut permissions = HashSet::new();
        for key in initial {
            let key = key.as_ref();
            if registry.contains(key) {
                permissions.insert(key.to_string());
            } else {
                tracing::debug!(
                    role = %name,
                    permission = %key,
                    "Dropping unregistered permission"
                );
            }
        }

        Self {
            name,
            description: description.into(),
            permissions,
        }
    }

    /// Role name (unique within a catalog, case-sensitive).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Check whether the role grants `key`.
    pub fn has_permission(&self, key: &str) -> bool {
        self.permissions.contains(key)
    }

    /// Add a permission if it is registered.
    ///
    /// Unknown keys are ignored. Adding a key the role already holds leaves
    /// the set unchanged.
    ///
    /// # Returns
    ///
    /// `true` if the key was newly added
    pub fn add_permission(&mut self, registry: &PermissionRegistry, key: &str) -> bool {
        if !registry.contains(key) {
            return false;
        }
        self.permissions.insert(key.to_string())
    }

    /// Remove a permission.
    ///
    /// # Returns
    ///
    /// `true` if the key was present
    pub fn remove_permission(&mut self, key: &str) -> bool {
        self.permissions.remove(key)
    }

    /// All permission keys held by the role, sorted.
    pub fn permissions(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.permissions.iter().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Iterate over held keys in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.permissions.iter().map(String::as_str)
    }

    /// Number of permissions held.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Check if the role grants nothing.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}
