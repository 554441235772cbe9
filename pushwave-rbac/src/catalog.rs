//! Role catalog and the built-in policy table
//!
//! The catalog maps role names to [`Role`]s. It is seeded once at startup,
//! either from the built-in table below or from [`RoleDefinition`]s loaded
//! through [`crate::config::PolicyConfig`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::actions::Action;
use crate::error::{RbacError, RbacResult};
use crate::permissions::{Permission, PermissionRegistry};
use crate::resources::ResourceType;
use crate::roles::Role;

/// Roles every Pushwave deployment ships with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinRole {
    /// Unrestricted access to every registered permission.
    SystemAdministrator,
    /// Owns audience, content, campaigns, and their analytics.
    MarketingManager,
    /// Builds, launches, and tests campaigns.
    CampaignManager,
    /// Writes notification templates.
    ContentEditor,
    /// Reads and exports delivery analytics.
    AnalyticsSpecialist,
    /// Maintains audience segments.
    SegmentManager,
    /// Connects webhooks, CDP imports, and CEP decisions.
    IntegrationSpecialist,
}

impl BuiltinRole {
    /// Get the role name used in the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SystemAdministrator => "system_administrator",
            Self::MarketingManager => "marketing_manager",
            Self::CampaignManager => "campaign_manager",
            Self::ContentEditor => "content_editor",
            Self::AnalyticsSpecialist => "analytics_specialist",
            Self::SegmentManager => "segment_manager",
            Self::IntegrationSpecialist => "integration_specialist",
        }
    }

    /// Parse a role name. Role names are case-sensitive.
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|r| r.as_str() == s)
    }

    /// Get all built-in roles.
    pub fn all() -> Vec<Self> {
        vec![
            Self::SystemAdministrator,
            Self::MarketingManager,
            Self::CampaignManager,
            Self::ContentEditor,
            Self::AnalyticsSpecialist,
            Self::SegmentManager,
            Self::IntegrationSpecialist,
        ]
    }

    /// Human-readable description stored on the role.
    pub fn description(&self) -> &'static str {
        match self {
            Self::SystemAdministrator => "Full access to every part of the system",
            Self::MarketingManager => {
                "Manages segments, templates, campaigns, triggers, A/B tests and their analytics"
            }
            Self::CampaignManager => "Creates, publishes and runs campaigns and A/B tests",
            Self::ContentEditor => "Creates and edits notification templates",
            Self::AnalyticsSpecialist => "Reviews and exports delivery analytics",
            Self::SegmentManager => "Creates and maintains audience segments",
            Self::IntegrationSpecialist => {
                "Configures webhooks, CDP integrations and CEP decisions"
            }
        }
    }

    /// Permission keys this role is seeded with.
    ///
    /// `SystemAdministrator` gets every key in `registry`. The other roles
    /// are fixed: "all" entries expand to the resource's default actions,
    /// so keys added by a policy file never reach them.
    pub fn grants(&self, registry: &PermissionRegistry) -> Vec<String> {
        use Action::*;
        use ResourceType as R;

        const READ_LIST: &[Action] = &[Read, List];

        let mut grants = Grants::default();
        match self {
            Self::SystemAdministrator => {
                return registry.all_keys().into_iter().collect();
            }
            Self::MarketingManager => {
                grants
                    .some(R::User, READ_LIST)
                    .some(R::Role, READ_LIST)
                    .all(R::Segment)
                    .all(R::Template)
                    .all(R::Campaign)
                    .all(R::Notification)
                    .all(R::Trigger)
                    .some(R::Webhook, READ_LIST)
                    .all(R::Analytics)
                    .all(R::AbTest)
                    .some(R::CepDecision, READ_LIST);
            }
            Self::CampaignManager => {
                grants
                    .some(R::Campaign, &[Create, Read, Update, List, Publish, Execute])
                    .some(R::Segment, READ_LIST)
                    .some(R::Template, READ_LIST)
                    .some(R::Notification, &[Create, Read, List, Execute])
                    .some(R::Trigger, &[Create, Read, Update, List])
                    .some(R::AbTest, &[Create, Read, Update, List, Execute])
                    .some(R::Analytics, &[Read]);
            }
            Self::ContentEditor => {
                grants
                    .some(R::Template, &[Create, Read, Update, Delete, List])
                    .some(R::Campaign, READ_LIST)
                    .some(R::Notification, READ_LIST);
            }
            Self::AnalyticsSpecialist => {
                grants
                    .some(R::Analytics, &[Read, List, Export])
                    .some(R::Campaign, READ_LIST)
                    .some(R::Segment, &[Read, List, Export])
                    .some(R::AbTest, READ_LIST)
                    .some(R::Notification, READ_LIST)
                    .some(R::CepDecision, READ_LIST);
            }
            Self::SegmentManager => {
                grants
                    .some(R::Segment, &[Create, Read, Update, Delete, List, Export])
                    .some(R::CdpIntegration, READ_LIST)
                    .some(R::Analytics, &[Read]);
            }
            Self::IntegrationSpecialist => {
                grants
                    .all(R::Webhook)
                    .all(R::CdpIntegration)
                    .all(R::CepDecision)
                    .some(R::Trigger, READ_LIST)
                    .some(R::Segment, READ_LIST);
            }
        }
        grants.keys
    }

    /// Build the role definition for this built-in role.
    pub fn definition(&self, registry: &PermissionRegistry) -> RoleDefinition {
        RoleDefinition {
            name: self.as_str().to_string(),
            description: self.description().to_string(),
            permissions: self.grants(registry),
        }
    }
}

/// Accumulates permission keys for a policy table entry.
#[derive(Default)]
struct Grants {
    keys: Vec<String>,
}

impl Grants {
    fn some(&mut self, resource: ResourceType, actions: &[Action]) -> &mut Self {
        self.keys.extend(
            actions
                .iter()
                .map(|&action| Permission::key_for(resource, action)),
        );
        self
    }

    fn all(&mut self, resource: ResourceType) -> &mut Self {
        self.some(resource, resource.default_actions())
    }
}

/// Serializable description of a role, used to seed a catalog.
///
/// # Examples
///
/// ```
/// use pushwave_rbac::catalog::RoleDefinition;
///
/// let def: RoleDefinition = serde_json::from_str(
///     r#"{"name": "auditor", "permissions": ["read_user", "list_user"]}"#,
/// ).unwrap();
/// assert_eq!(def.name, "auditor");
/// assert!(def.description.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    /// Role name
    pub name: String,

    /// Role description
    #[serde(default)]
    pub description: String,

    /// Permission keys; unregistered keys are dropped when the role is built
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl RoleDefinition {
    /// Create a definition.
    pub fn new<I, S>(
        name: impl Into<String>,
        description: impl Into<String>,
        permissions: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    /// Build the role against a registry.
    pub fn build(&self, registry: &PermissionRegistry) -> Role {
        Role::new(&self.name, &self.description, &self.permissions, registry)
    }
}

/// Mapping from role name to [`Role`].
///
/// # Examples
///
/// ```
/// use pushwave_rbac::{PermissionRegistry, RoleCatalog};
///
/// let registry = PermissionRegistry::with_defaults();
/// let catalog = RoleCatalog::builtin(&registry);
///
/// let editor = catalog.get("content_editor").unwrap();
/// assert!(editor.has_permission("create_template"));
/// assert!(catalog.get("Content_Editor").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoleCatalog {
    roles: HashMap<String, Role>,
}

impl RoleCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            roles: HashMap::new(),
        }
    }

    /// Build the catalog holding every [`BuiltinRole`].
    pub fn builtin(registry: &PermissionRegistry) -> Self {
        let roles = BuiltinRole::all()
            .into_iter()
            .map(|r| {
                let role = r.definition(registry).build(registry);
                (role.name().to_string(), role)
            })
            .collect();
        Self { roles }
    }

    /// Build a catalog from definitions.
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::DuplicateRole`] if two definitions share a name,
    /// or [`RbacError::InvalidPolicy`] if a name is empty.
    pub fn from_definitions<'a, I>(
        registry: &PermissionRegistry,
        definitions: I,
    ) -> RbacResult<Self>
    where
        I: IntoIterator<Item = &'a RoleDefinition>,
    {
        let mut catalog = Self::new();
        for def in definitions {
            if def.name.trim().is_empty() {
                return Err(RbacError::InvalidPolicy("role name must not be empty".to_string()));
            }
            if catalog.roles.contains_key(&def.name) {
                return Err(RbacError::DuplicateRole(def.name.clone()));
            }
            catalog.roles.insert(def.name.clone(), def.build(registry));
        }
        Ok(catalog)
    }

    /// Look up a role by name.
    pub fn get(&self, name: &str) -> Option<&Role> {
        self.roles.get(name)
    }

    /// All roles keyed by name.
    pub fn all(&self) -> &HashMap<String, Role> {
        &self.roles
    }

    /// Role names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.roles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Check whether a role exists.
    pub fn contains(&self, name: &str) -> bool {
        self.roles.contains_key(name)
    }

    /// Insert a role, replacing any role with the same name.
    ///
    /// # Returns
    ///
    /// The replaced role, if any
    pub fn upsert(&mut self, role: Role) -> Option<Role> {
        self.roles.insert(role.name().to_string(), role)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Role> {
        self.roles.get_mut(name)
    }

    /// Number of roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> (PermissionRegistry, RoleCatalog) {
        let registry = PermissionRegistry::with_defaults();
        let catalog = RoleCatalog::builtin(&registry);
        (registry, catalog)
    }

    #[test]
    fn test_builtin_role_names() {
        let (_, catalog) = builtin();
        assert_eq!(
            catalog.names(),
            vec![
                "analytics_specialist",
                "campaign_manager",
                "content_editor",
                "integration_specialist",
                "marketing_manager",
                "segment_manager",
                "system_administrator",
            ]
        );
        for role in BuiltinRole::all() {
            assert_eq!(BuiltinRole::parse(role.as_str()), Some(role));
            assert_eq!(catalog.get(role.as_str()).unwrap().description(), role.description());
        }
        assert_eq!(BuiltinRole::parse("System_Administrator"), None);
    }

    #[test]
    fn test_system_administrator_has_everything() {
        let (registry, catalog) = builtin();
        let admin = catalog.get("system_administrator").unwrap();
        assert_eq!(admin.len(), registry.len());
        for key in registry.keys() {
            assert!(admin.has_permission(key), "admin missing {key}");
        }
    }

    #[test]
    fn test_every_grant_is_registered() {
        let (registry, _) = builtin();
        for role in BuiltinRole::all() {
            for key in role.grants(&registry) {
                assert!(registry.contains(&key), "{} grants unregistered {key}", role.as_str());
            }
        }
    }

    #[test]
    fn test_policy_table_membership() {
        let (_, catalog) = builtin();
        let role = |name: &str| catalog.get(name).unwrap().clone();

        let analytics = role("analytics_specialist");
        assert!(analytics.has_permission("export_analytics"));
        assert!(!analytics.has_permission("create_campaign"));

        let segments = role("segment_manager");
        assert!(segments.has_permission("delete_segment"));
        assert!(!segments.has_permission("create_cdp_integration"));

        let integrations = role("integration_specialist");
        assert!(integrations.has_permission("execute_webhook"));
        assert!(!integrations.has_permission("publish_campaign"));

        let campaigns = role("campaign_manager");
        assert!(campaigns.has_permission("publish_campaign"));
        assert!(!campaigns.has_permission("create_template"));
        assert!(!campaigns.has_permission("approve_campaign"));
        assert!(!campaigns.has_permission("delete_campaign"));

        let content = role("content_editor");
        assert!(content.has_permission("create_template"));
        assert!(!content.has_permission("publish_template"));

        let marketing = role("marketing_manager");
        assert!(marketing.has_permission("approve_campaign"));
        assert!(marketing.has_permission("publish_template"));
        assert!(!marketing.has_permission("create_user"));
        assert!(!marketing.has_permission("update_system_settings"));
    }

    #[test]
    fn test_extra_keys_only_reach_system_administrator() {
        let mut registry = PermissionRegistry::with_defaults();
        registry
            .register("send_test_push", ResourceType::Notification, Action::Execute)
            .unwrap();
        registry
            .register("rotate_webhook_secret", ResourceType::Webhook, Action::Update)
            .unwrap();
        let catalog = RoleCatalog::builtin(&registry);

        let marketing = catalog.get("marketing_manager").unwrap();
        assert!(marketing.has_permission("execute_notification"));
        assert!(!marketing.has_permission("send_test_push"));

        let integrations = catalog.get("integration_specialist").unwrap();
        assert!(integrations.has_permission("update_webhook"));
        assert!(!integrations.has_permission("rotate_webhook_secret"));

        let admin = catalog.get("system_administrator").unwrap();
        assert!(admin.has_permission("send_test_push"));
        assert!(admin.has_permission("rotate_webhook_secret"));
        assert_eq!(
            marketing.len(),
            RoleCatalog::builtin(&PermissionRegistry::with_defaults())
                .get("marketing_manager")
                .unwrap()
                .len()
        );
    }

    #[test]
    fn test_from_definitions_rejects_duplicates() {
        let registry = PermissionRegistry::with_defaults();
        let defs = vec![
            RoleDefinition::new("auditor", "", ["read_user"]),
            RoleDefinition::new("auditor", "again", ["list_user"]),
        ];
        let err = RoleCatalog::from_definitions(&registry, &defs).unwrap_err();
        assert!(matches!(err, RbacError::DuplicateRole(ref n) if n == "auditor"));
    }

    #[test]
    fn test_from_definitions_rejects_empty_name() {
        let registry = PermissionRegistry::with_defaults();
        let defs = vec![RoleDefinition::new("  ", "", Vec::<String>::new())];
        assert!(matches!(
            RoleCatalog::from_definitions(&registry, &defs),
            Err(RbacError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_from_definitions_filters_unknown_keys() {
        let registry = PermissionRegistry::with_defaults();
        let defs = vec![RoleDefinition::new("auditor", "Audits", ["read_user", "read_everything"])];
        let catalog = RoleCatalog::from_definitions(&registry, &defs).unwrap();
        assert_eq!(catalog.get("auditor").unwrap().permissions(), vec!["read_user"]);
    }

    #[test]
    fn test_upsert_replaces() {
        let (registry, mut catalog) = builtin();
        let editor = RoleDefinition::new("content_editor", "", ["read_template"]);
        let replaced = catalog.upsert(editor.build(&registry));
        assert!(replaced.unwrap().has_permission("create_template"));
        assert!(!catalog.get("content_editor").unwrap().has_permission("create_template"));
        assert_eq!(catalog.len(), 7);
    }
}
