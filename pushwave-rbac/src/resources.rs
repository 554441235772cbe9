//! # Resource Types
//!
//! Defines every resource type of the Pushwave backend that can carry
//! permissions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::actions::Action;

/// Resource types that can have permissions assigned.
///
/// The string form (`as_str`) is the suffix of every permission key, so
/// `ResourceType::AbTest` + `Action::Create` is `create_ab_test`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Backend user accounts.
    User,
    /// Roles and their permission sets.
    Role,
    /// Audience segments.
    Segment,
    /// Notification templates.
    Template,
    /// Push campaigns.
    Campaign,
    /// Individual notifications.
    Notification,
    /// Event-driven triggers.
    Trigger,
    /// Outbound webhooks.
    Webhook,
    /// Delivery analytics.
    Analytics,
    /// Customer data platform integrations.
    CdpIntegration,
    /// Complex event processing decisions.
    CepDecision,
    /// A/B tests.
    AbTest,
    /// Global system settings.
    SystemSettings,
}

impl ResourceType {
    /// Get the string representation of the resource type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::User => "user",
            ResourceType::Role => "role",
            ResourceType::Segment => "segment",
            ResourceType::Template => "template",
            ResourceType::Campaign => "campaign",
            ResourceType::Notification => "notification",
            ResourceType::Trigger => "trigger",
            ResourceType::Webhook => "webhook",
            ResourceType::Analytics => "analytics",
            ResourceType::CdpIntegration => "cdp_integration",
            ResourceType::CepDecision => "cep_decision",
            ResourceType::AbTest => "ab_test",
            ResourceType::SystemSettings => "system_settings",
        }
    }

    /// Actions registered for this resource in the default permission catalog.
    ///
    /// Not every action makes sense on every resource: analytics cannot be
    /// published and system settings are never listed or deleted.
    pub fn default_actions(&self) -> &'static [Action] {
        use Action::*;
        match self {
            ResourceType::User | ResourceType::Role => &[Create, Read, Update, Delete, List],
            ResourceType::Segment => &[Create, Read, Update, Delete, List, Export],
            ResourceType::Template => &[Create, Read, Update, Delete, List, Publish],
            ResourceType::Campaign => &[
                Create, Read, Update, Delete, List, Publish, Approve, Execute,
            ],
            ResourceType::Notification => &[Create, Read, Delete, List, Execute],
            ResourceType::Trigger
            | ResourceType::Webhook
            | ResourceType::CdpIntegration
            | ResourceType::CepDecision => &[Create, Read, Update, Delete, List, Execute],
            ResourceType::Analytics => &[Read, List, Export],
            ResourceType::AbTest => &[Create, Read, Update, Delete, List, Approve, Execute],
            ResourceType::SystemSettings => &[Read, Update],
        }
    }

    /// Get all resource types.
    pub fn all() -> Vec<Self> {
        vec![
            ResourceType::User,
            ResourceType::Role,
            ResourceType::Segment,
            ResourceType::Template,
            ResourceType::Campaign,
            ResourceType::Notification,
            ResourceType::Trigger,
            ResourceType::Webhook,
            ResourceType::Analytics,
            ResourceType::CdpIntegration,
            ResourceType::CepDecision,
            ResourceType::AbTest,
            ResourceType::SystemSettings,
        ]
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
