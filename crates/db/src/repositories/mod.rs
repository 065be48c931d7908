//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or any `PgExecutor`, for methods that must run
//! inside a caller-owned transaction) as the first argument.

pub mod reservation_repo;
pub mod villa_repo;

pub use reservation_repo::ReservationRepo;
pub use villa_repo::VillaRepo;
