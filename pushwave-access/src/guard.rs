//! Access guard
//!
//! Wraps a shared [`PolicyProvider`] and turns authorization decisions into
//! `Result`s that handlers can propagate with `?`. The reason for a denial
//! is logged here and then dropped; callers only ever see
//! [`AccessError::Forbidden`].

use std::sync::Arc;

use pushwave_rbac::{Action, PolicyProvider, ResourceType};

use crate::error::{AccessError, AccessResult};
use crate::principal::Principal;

/// Permission checks for request handlers.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use uuid::Uuid;
/// use pushwave_access::{AccessError, AccessGuard, Principal};
/// use pushwave_rbac::PolicyProvider;
///
/// let guard = AccessGuard::new(Arc::new(PolicyProvider::builtin()));
/// let analyst = Principal::new(Uuid::now_v7()).with_role("analytics_specialist");
///
/// assert!(guard.require(&analyst, "export_analytics").is_ok());
/// assert!(matches!(
///     guard.require(&analyst, "create_campaign"),
///     Err(AccessError::Forbidden)
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct AccessGuard {
    provider: Arc<PolicyProvider>,
}

impl AccessGuard {
    /// Create a guard over a shared provider.
    pub fn new(provider: Arc<PolicyProvider>) -> Self {
        Self { provider }
    }

    /// The provider this guard consults.
    pub fn provider(&self) -> &Arc<PolicyProvider> {
        &self.provider
    }

    /// Require a single permission.
    pub fn require(&self, principal: &Principal, key: &str) -> AccessResult<()> {
        let decision = self.provider.decide(principal.roles(), key);
        if decision.is_granted() {
            return Ok(());
        }

        tracing::warn!(
            user_id = %principal.user_id,
            permission = %key,
            reason = decision.as_str(),
            "Access denied"
        );
        Err(AccessError::Forbidden)
    }

    /// Require at least one of `keys`.
    pub fn require_any<K: AsRef<str>>(
        &self,
        principal: &Principal,
        keys: &[K],
    ) -> AccessResult<()> {
        if self.provider.is_authorized_any(principal.roles(), keys) {
            return Ok(());
        }
        self.deny(principal, keys)
    }

    /// Require every one of `keys`; each may come from a different role.
    pub fn require_all<K: AsRef<str>>(
        &self,
        principal: &Principal,
        keys: &[K],
    ) -> AccessResult<()> {
        if self.provider.is_authorized_all(principal.roles(), keys) {
            return Ok(());
        }
        self.deny(principal, keys)
    }

    /// Require the canonical permission for `action` on `resource`.
    pub fn require_action(
        &self,
        principal: &Principal,
        resource: ResourceType,
        action: Action,
    ) -> AccessResult<()> {
        if self.provider.is_authorized_for(principal.roles(), resource, action) {
            return Ok(());
        }

        tracing::warn!(
            user_id = %principal.user_id,
            resource = %resource,
            action = %action,
            "Access denied"
        );
        Err(AccessError::Forbidden)
    }

    /// Like [`AccessGuard::require`] for requests that may be anonymous.
    pub fn require_authenticated(
        &self,
        principal: Option<&Principal>,
        key: &str,
    ) -> AccessResult<()> {
        match principal {
            Some(principal) => self.require(principal, key),
            None => Err(AccessError::Unauthenticated),
        }
    }

    fn deny<K: AsRef<str>>(&self, principal: &Principal, keys: &[K]) -> AccessResult<()> {
        let keys: Vec<&str> = keys.iter().map(|k| k.as_ref()).collect();
        tracing::warn!(
            user_id = %principal.user_id,
            permissions = ?keys,
            "Access denied"
        );
        Err(AccessError::Forbidden)
    }
}
