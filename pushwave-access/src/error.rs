//! Error types for access checks
//!
//! Every denial maps to the same `Forbidden` variant so API responses don't
//! reveal whether a permission exists or which role was missing.

use pushwave_rbac::RbacError;
use thiserror::Error;

/// Access error types.
#[derive(Debug, Error)]
pub enum AccessError {
    /// No authenticated principal on the request
    #[error("Authentication required")]
    Unauthenticated,

    /// Principal lacks the required permission
    #[error("Forbidden: insufficient permissions")]
    Forbidden,

    /// Policy could not be loaded or administered
    #[error("Policy error: {0}")]
    Policy(#[from] RbacError),
}

/// Result type for access checks.
pub type AccessResult<T> = Result<T, AccessError>;

impl AccessError {
    /// Check if this error should be logged at error level.
    ///
    /// Denials and unknown role names are expected traffic and are not
    /// server errors.
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Get HTTP status code for this error.
    ///
    /// An unknown role only reaches this mapping from an administrative
    /// grant or revoke, where it is a missing resource.
    pub fn status_code(&self) -> u16 {
        match self {
            AccessError::Unauthenticated => 401,
            AccessError::Forbidden => 403,
            AccessError::Policy(RbacError::UnknownRole(_)) => 404,
            AccessError::Policy(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AccessError::Unauthenticated => "UNAUTHENTICATED",
            AccessError::Forbidden => "FORBIDDEN",
            AccessError::Policy(e) => e.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AccessError::Unauthenticated.status_code(), 401);
        assert_eq!(AccessError::Forbidden.status_code(), 403);
        assert_eq!(
            AccessError::Policy(RbacError::UnknownRole("x".into())).status_code(),
            404
        );
        assert!(!AccessError::Policy(RbacError::UnknownRole("x".into())).is_server_error());
        assert_eq!(
            AccessError::Policy(RbacError::InvalidPolicy("x".into())).status_code(),
            500
        );
    }

    #[test]
    fn test_forbidden_message_is_generic() {
        assert_eq!(
            AccessError::Forbidden.to_string(),
            "Forbidden: insufficient permissions"
        );
        assert_eq!(AccessError::Forbidden.error_code(), "FORBIDDEN");
        assert!(!AccessError::Forbidden.is_server_error());
    }

    #[test]
    fn test_policy_error_conversion() {
        let err: AccessError = RbacError::DuplicateRole("auditor".into()).into();
        assert_eq!(err.error_code(), "DUPLICATE_ROLE");
        assert!(err.is_server_error());
    }
}
