//! Authorization decisions
//!
//! Every check here is a total function: unknown permission keys, unknown
//! role names, and empty role sets all resolve to a denial instead of an
//! error.

use std::collections::BTreeSet;

use crate::actions::Action;
use crate::catalog::RoleCatalog;
use crate::permissions::{Permission, PermissionRegistry};
use crate::resources::ResourceType;

/// Outcome of a single authorization check, with the reason.
///
/// The reason is for internal logging only. Callers exposing a decision to
/// clients should collapse every denial into the same "forbidden" response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Granted by the named role.
    Granted {
        /// First role (in caller order) that grants the permission.
        role: String,
    },
    /// The principal holds no roles.
    NoRoles,
    /// The permission key is not registered.
    UnknownPermission,
    /// None of the principal's known roles grant the permission.
    NotGranted,
}

impl Decision {
    /// Check if the decision allows the request.
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted { .. })
    }

    /// Short label for structured logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Granted { .. } => "granted",
            Decision::NoRoles => "no_roles",
            Decision::UnknownPermission => "unknown_permission",
            Decision::NotGranted => "not_granted",
        }
    }
}

/// Borrowed view over a registry and catalog that answers authorization
/// queries.
///
/// # Examples
///
/// ```
/// use pushwave_rbac::{Authorizer, PermissionRegistry, RoleCatalog};
///
/// let registry = PermissionRegistry::with_defaults();
/// let catalog = RoleCatalog::builtin(&registry);
/// let authz = Authorizer::new(&registry, &catalog);
///
/// assert!(authz.is_authorized(&["analytics_specialist"], "export_analytics"));
/// assert!(!authz.is_authorized(&["analytics_specialist"], "create_campaign"));
/// assert!(authz.is_authorized_any(
///     &["campaign_manager", "content_editor"],
///     &["create_template"],
/// ));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Authorizer<'a> {
    registry: &'a PermissionRegistry,
    catalog: &'a RoleCatalog,
}

impl<'a> Authorizer<'a> {
    /// Create an authorizer over a registry and catalog.
    pub fn new(registry: &'a PermissionRegistry, catalog: &'a RoleCatalog) -> Self {
        Self { registry, catalog }
    }

    /// Decide a single permission and report why.
    pub fn decide<S: AsRef<str>>(&self, role_names: &[S], key: &str) -> Decision {
        if role_names.is_empty() {
            return Decision::NoRoles;
        }
        if !self.registry.contains(key) {
            return Decision::UnknownPermission;
        }

        for name in role_names {
            let name = name.as_ref();
            if self
                .catalog
                .get(name)
                .is_some_and(|role| role.has_permission(key))
            {
                return Decision::Granted {
                    role: name.to_string(),
                };
            }
        }
        Decision::NotGranted
    }

    /// Check whether any of `role_names` grants `key`.
    ///
    /// Unknown role names grant nothing; an unknown key or an empty role
    /// list is always denied.
    pub fn is_authorized<S: AsRef<str>>(&self, role_names: &[S], key: &str) -> bool {
        self.decide(role_names, key).is_granted()
    }

    /// Check whether any role grants any of `keys`.
    pub fn is_authorized_any<S, K>(&self, role_names: &[S], keys: &[K]) -> bool
    where
        S: AsRef<str>,
        K: AsRef<str>,
    {
        keys.iter()
            .any(|key| self.is_authorized(role_names, key.as_ref()))
    }

    /// Check whether every one of `keys` is granted by at least one role.
    ///
    /// Each key may be satisfied by a different role. An empty `keys`
    /// list is denied.
    pub fn is_authorized_all<S, K>(&self, role_names: &[S], keys: &[K]) -> bool
    where
        S: AsRef<str>,
        K: AsRef<str>,
    {
        !keys.is_empty()
            && keys
                .iter()
                .all(|key| self.is_authorized(role_names, key.as_ref()))
    }

    /// Typed form of [`Authorizer::is_authorized`] using the canonical key.
    pub fn is_authorized_for<S: AsRef<str>>(
        &self,
        role_names: &[S],
        resource: ResourceType,
        action: Action,
    ) -> bool {
        self.is_authorized(role_names, &Permission::key_for(resource, action))
    }

    /// Union of registered keys granted by `role_names`, sorted.
    pub fn effective_permissions<S: AsRef<str>>(&self, role_names: &[S]) -> BTreeSet<&'a str> {
        let catalog: &'a RoleCatalog = self.catalog;
        let registry: &'a PermissionRegistry = self.registry;
        role_names
            .iter()
            .filter_map(|name| catalog.get(name.as_ref()))
            .flat_map(|role| role.iter())
            .filter(|key| registry.contains(key))
            .collect()
    }
}
