//! # Permissions
//!
//! A permission is a resource type paired with an action and identified by a
//! string key such as `create_campaign`. The [`PermissionRegistry`] is the
//! single source of truth for which keys exist.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::actions::Action;
use crate::error::{RbacError, RbacResult};
use crate::resources::ResourceType;

/// A registered permission.
///
/// # Example
///
/// ```
/// use pushwave_rbac::permissions::Permission;
/// use pushwave_rbac::resources::ResourceType;
/// use pushwave_rbac::actions::Action;
///
/// let perm = Permission::new(ResourceType::Campaign, Action::Publish);
/// assert_eq!(perm.key, "publish_campaign");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Permission {
    /// Unique, case-sensitive key.
    pub key: String,
    /// The resource type this permission applies to.
    pub resource: ResourceType,
    /// The action allowed on the resource.
    pub action: Action,
}

impl Permission {
    /// Create a permission with the canonical `{action}_{resource}` key.
    pub fn new(resource: ResourceType, action: Action) -> Self {
        Self {
            key: Self::key_for(resource, action),
            resource,
            action,
        }
    }

    /// Create a permission with an explicit key.
    ///
    /// Used for legacy keys that don't follow the canonical format.
    pub fn with_key(key: impl Into<String>, resource: ResourceType, action: Action) -> Self {
        Self {
            key: key.into(),
            resource,
            action,
        }
    }

    /// Build the canonical key for a resource and action.
    pub fn key_for(resource: ResourceType, action: Action) -> String {
        format!("{}_{}", action.as_str(), resource.as_str())
    }

    /// Split a canonical key back into its resource and action.
    ///
    /// This does not consult a registry; a parsed key may still be
    /// unregistered.
    ///
    /// # Example
    ///
    /// ```
    /// use pushwave_rbac::permissions::Permission;
    /// use pushwave_rbac::resources::ResourceType;
    /// use pushwave_rbac::actions::Action;
    ///
    /// let perm = Permission::parse_key("execute_cdp_integration").unwrap();
    /// assert_eq!(perm.resource, ResourceType::CdpIntegration);
    /// assert_eq!(perm.action, Action::Execute);
    /// assert!(Permission::parse_key("launch_rocket").is_none());
    /// ```
    pub fn parse_key(key: &str) -> Option<Self> {
        let (action, resource) = key.split_once('_')?;
        let action = Action::all().into_iter().find(|a| a.as_str() == action)?;
        let resource = ResourceType::all()
            .into_iter()
            .find(|r| r.as_str() == resource)?;
        Some(Self::new(resource, action))
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Catalog of every permission the system knows about.
///
/// Built once at startup and read-only afterwards. Registering a key twice
/// is an error because it means the policy table itself is wrong.
///
/// # Example
///
/// ```
/// use pushwave_rbac::permissions::PermissionRegistry;
/// use pushwave_rbac::resources::ResourceType;
/// use pushwave_rbac::actions::Action;
///
/// let mut registry = PermissionRegistry::new();
/// registry.register("create_campaign", ResourceType::Campaign, Action::Create).unwrap();
/// assert!(registry.register("create_campaign", ResourceType::Campaign, Action::Create).is_err());
/// assert!(registry.lookup("create_campaign").is_some());
/// assert!(registry.lookup("delete_campaign").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PermissionRegistry {
    entries: HashMap<String, Permission>,
}

impl PermissionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create a registry holding the default Pushwave permission catalog.
    ///
    /// Every resource type contributes one permission per entry in
    /// [`ResourceType::default_actions`].
    pub fn with_defaults() -> Self {
        let entries = ResourceType::all()
            .into_iter()
            .flat_map(|resource| {
                resource
                    .default_actions()
                    .iter()
                    .map(move |&action| Permission::new(resource, action))
            })
            .map(|perm| (perm.key.clone(), perm))
            .collect();
        Self { entries }
    }

    /// Register a permission under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::DuplicatePermission`] if the key already exists.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        resource: ResourceType,
        action: Action,
    ) -> RbacResult<&Permission> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(RbacError::DuplicatePermission(key));
        }
        let perm = Permission::with_key(key.clone(), resource, action);
        Ok(self.entries.entry(key).or_insert(perm))
    }

    /// Register the canonical permission for a resource and action.
    pub fn register_pair(
        &mut self,
        resource: ResourceType,
        action: Action,
    ) -> RbacResult<&Permission> {
        self.register(Permission::key_for(resource, action), resource, action)
    }

    /// Look up a permission by key.
    pub fn lookup(&self, key: &str) -> Option<&Permission> {
        self.entries.get(key)
    }

    /// Look up the canonical permission for a resource and action.
    pub fn lookup_pair(&self, resource: ResourceType, action: Action) -> Option<&Permission> {
        self.entries.get(&Permission::key_for(resource, action))
    }

    /// Check whether a key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All registered keys, sorted.
    pub fn all_keys(&self) -> BTreeSet<String> {
        self.entries.keys().cloned().collect()
    }

    /// Iterate over registered keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All permissions registered for a resource type.
    pub fn for_resource(&self, resource: ResourceType) -> Vec<&Permission> {
        let mut perms: Vec<&Permission> = self
            .entries
            .values()
            .filter(|p| p.resource == resource)
            .collect();
        perms.sort_by_key(|p| p.action);
        perms
    }

    /// Get the count of permissions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
