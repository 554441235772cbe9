//! Authenticated principals
//!
//! The request layer resolves a session or token into a [`Principal`] before
//! any access check runs. A principal carries role names only; what those
//! roles grant is decided by the policy.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated user and the role names assigned to them.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use pushwave_access::Principal;
///
/// let principal = Principal::new(Uuid::now_v7())
///     .with_email("ops@example.com")
///     .with_role("campaign_manager")
///     .with_role("campaign_manager");
///
/// assert_eq!(principal.roles(), ["campaign_manager"]);
/// assert!(principal.has_role("campaign_manager"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// User ID
    pub user_id: Uuid,

    /// User email, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Assigned role names, deduplicated, in assignment order
    #[serde(default)]
    roles: Vec<String>,
}

impl Principal {
    /// Create a principal with no roles.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            email: None,
            roles: Vec::new(),
        }
    }

    /// Create a principal holding `roles`.
    pub fn with_roles<I, S>(user_id: Uuid, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        roles
            .into_iter()
            .fold(Self::new(user_id), |p, role| p.with_role(role))
    }

    /// Set the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Add a role name. Repeated names are ignored.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        let role = role.into();
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    /// Role names held by this principal.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Check whether the principal holds a role name.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_principal_has_no_roles() {
        let principal = Principal::new(Uuid::now_v7());
        assert!(principal.roles().is_empty());
        assert!(principal.email.is_none());
    }

    #[test]
    fn test_with_roles_dedupes() {
        let principal = Principal::with_roles(
            Uuid::now_v7(),
            ["segment_manager", "content_editor", "segment_manager"],
        );
        assert_eq!(principal.roles(), ["segment_manager", "content_editor"]);
        assert!(!principal.has_role("Segment_Manager"));
    }

    #[test]
    fn test_deserialize_without_roles() {
        let principal: Principal = serde_json::from_str(
            r#"{"user_id": "018f3a5c-7b2e-7cde-9f00-0123456789ab"}"#,
        )
        .unwrap();
        assert!(principal.roles().is_empty());
    }
}
