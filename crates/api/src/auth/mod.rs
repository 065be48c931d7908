//! Bearer-token primitives.
//!
//! - [`jwt`] -- HS256 access-token verification for deployments that check
//!   tokens locally instead of asking the identity service.

pub mod jwt;
