//! # Pushwave RBAC (Role-Based Access Control)
//!
//! This crate provides the authorization model for the Pushwave web-push
//! campaign backend.
//!
//! ## Overview
//!
//! The pushwave-rbac crate handles:
//! - **Resources**: Everything the API exposes (campaigns, segments, templates, ...)
//! - **Actions**: Operations that can be performed on resources
//! - **Permissions**: Resource + Action pairs identified by a string key
//! - **Roles**: Named sets of permission keys, seeded from a fixed policy table
//! - **Authorization**: Deciding whether a set of role names grants a permission
//!
//! ## Architecture
//!
//! ```text
//! PermissionRegistry ──┐
//!                      ├─→ PolicySnapshot ─→ Authorizer ─→ bool
//! RoleCatalog ─────────┘        ↑
//!                         PolicyProvider (grant / revoke swap snapshots)
//!
//! Permission keys:
//!   "create_campaign"      - Create campaigns
//!   "export_analytics"     - Export delivery analytics
//!   "approve_ab_test"      - Approve an A/B test
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pushwave_rbac::{Action, PolicyProvider, ResourceType};
//!
//! let provider = PolicyProvider::builtin();
//!
//! assert!(provider.is_authorized(&["analytics_specialist"], "export_analytics"));
//! assert!(!provider.is_authorized(&["analytics_specialist"], "create_campaign"));
//!
//! // Each key may be granted by a different role
//! assert!(provider.is_authorized_all(
//!     &["content_editor", "campaign_manager"],
//!     &["create_template", "publish_campaign"],
//! ));
//!
//! // Typed form
//! assert!(provider.is_authorized_for(
//!     &["segment_manager"],
//!     ResourceType::Segment,
//!     Action::Delete,
//! ));
//! ```
//!
//! ## Failure Modes
//!
//! Authorization queries never fail. Unknown permission keys, unknown role
//! names, and empty role sets all deny. Only building the policy (duplicate
//! keys or role names, unreadable policy files) returns [`RbacError`].

pub mod actions;
pub mod authz;
pub mod catalog;
pub mod config;
pub mod error;
pub mod permissions;
pub mod provider;
pub mod resources;
pub mod roles;

// Re-export main types for convenience
pub use actions::Action;
pub use authz::{Authorizer, Decision};
pub use catalog::{BuiltinRole, RoleCatalog, RoleDefinition};
pub use config::PolicyConfig;
pub use error::{RbacError, RbacResult};
pub use permissions::{Permission, PermissionRegistry};
pub use provider::{PolicyProvider, PolicySnapshot};
pub use resources::ResourceType;
pub use roles::Role;
