//! Error types for policy construction and administration
//!
//! Authorization queries never fail; only building a registry or catalog,
//! loading a policy file, or mutating a role can return these errors.

use thiserror::Error;

/// RBAC error types.
#[derive(Debug, Error)]
pub enum RbacError {
    /// A permission key was registered twice.
    #[error("Permission already registered: {0}")]
    DuplicatePermission(String),

    /// Two role definitions share a name.
    #[error("Role defined more than once: {0}")]
    DuplicateRole(String),

    /// Administrative mutation targeted a role that is not in the catalog.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// A policy definition is structurally invalid.
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    /// Policy file could not be read.
    #[error("Failed to read policy file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Policy file is not valid JSON for a policy configuration.
    #[error("Failed to parse policy: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for RBAC operations.
pub type RbacResult<T> = Result<T, RbacError>;

impl RbacError {
    /// Check if this error indicates a bug in the static policy table
    /// rather than bad operator input.
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            RbacError::DuplicatePermission(_) | RbacError::DuplicateRole(_)
        )
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            RbacError::DuplicatePermission(_) => "DUPLICATE_PERMISSION",
            RbacError::DuplicateRole(_) => "DUPLICATE_ROLE",
            RbacError::UnknownRole(_) => "UNKNOWN_ROLE",
            RbacError::InvalidPolicy(_) => "INVALID_POLICY",
            RbacError::Io { .. } => "POLICY_IO_ERROR",
            RbacError::Json(_) => "POLICY_PARSE_ERROR",
        }
    }
}
