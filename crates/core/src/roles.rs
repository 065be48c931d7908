//! Well-known role name constants.
//!
//! These must match the role names issued by the identity service.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MEMBER: &str = "member";
