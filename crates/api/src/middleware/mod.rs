//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.

pub mod auth;
pub mod rbac;
