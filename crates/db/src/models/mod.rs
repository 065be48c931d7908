//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` input DTOs for inserts and updates

pub mod reservation;
pub mod villa;
