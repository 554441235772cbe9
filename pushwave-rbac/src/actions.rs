//! # Actions
//!
//! Defines the operations a permission can grant on a Pushwave resource.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Actions that can be performed on resources.
///
/// - **Create / Read / Update / Delete / List**: the CRUD surface of the API
/// - **Publish**: make a template or campaign live
/// - **Approve**: sign off a campaign or A/B test before it goes out
/// - **Execute**: run something (send a notification, fire a trigger or webhook)
/// - **Export**: download data (analytics, segment members)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create new resource instances.
    Create,

    /// Read a single resource.
    Read,

    /// Modify existing resource data.
    Update,

    /// Permanently remove resources.
    Delete,

    /// Browse and search through multiple resources.
    List,

    /// Make a resource live for end users.
    Publish,

    /// Approve a pending resource.
    Approve,

    /// Run a process or trigger a delivery.
    Execute,

    /// Download or export resource data.
    Export,
}

impl Action {
    /// Get the string representation of the action.
    ///
    /// This is the prefix used in permission keys (`create_campaign`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::List => "list",
            Action::Publish => "publish",
            Action::Approve => "approve",
            Action::Execute => "execute",
            Action::Export => "export",
        }
    }

    /// Get all actions.
    pub fn all() -> Vec<Self> {
        vec![
            Action::Create,
            Action::Read,
            Action::Update,
            Action::Delete,
            Action::List,
            Action::Publish,
            Action::Approve,
            Action::Execute,
            Action::Export,
        ]
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
