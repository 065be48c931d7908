//! Domain types and pure logic shared by the villa services.
//!
//! Nothing in this crate performs I/O: the database layer lives in
//! `villa-db` and the HTTP layer in `villa-api`.

pub mod error;
pub mod pricing;
pub mod roles;
pub mod stay;
pub mod types;
pub mod villa;
