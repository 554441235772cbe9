//! # Pushwave Access
//!
//! Request-layer access checks for the Pushwave campaign backend.
//!
//! ## Overview
//!
//! The HTTP layer authenticates a request, resolves the user's assigned role
//! names into a [`Principal`], and asks an [`AccessGuard`] whether the
//! endpoint's required permission is granted. A denial becomes
//! [`AccessError::Forbidden`], which maps to HTTP 403.
//!
//! ```text
//! request ─→ authenticate ─→ Principal { user_id, roles }
//!                                   │
//!                                   ▼
//!                 AccessGuard::require(principal, "publish_campaign")
//!                                   │
//!                     PolicyProvider (pushwave-rbac)
//!                                   │
//!                        Ok(()) │ Err(Forbidden) → 403
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use uuid::Uuid;
//! use pushwave_access::{AccessGuard, Principal};
//! use pushwave_rbac::PolicyProvider;
//!
//! let provider = Arc::new(PolicyProvider::builtin());
//! let guard = AccessGuard::new(provider);
//!
//! let user = Principal::new(Uuid::now_v7()).with_role("segment_manager");
//! guard.require(&user, "delete_segment").unwrap();
//!
//! let err = guard.require(&user, "publish_campaign").unwrap_err();
//! assert_eq!(err.status_code(), 403);
//! ```

pub mod error;
pub mod guard;
pub mod principal;

// Re-export main types for convenience
pub use error::{AccessError, AccessResult};
pub use guard::AccessGuard;
pub use principal::Principal;
