use chrono::NaiveDate;

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Check-in must fall strictly before check-out.
    #[error("Invalid dates: check-in {check_in} must be before check-out {check_out}")]
    InvalidDateOrder {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    /// The villa referenced by a reservation does not exist in the directory.
    #[error("Villa with id {0} not found")]
    VillaNotFound(DbId),

    #[error("People count {requested} exceeds maximum capacity {maximum}")]
    CapacityExceeded { requested: i32, maximum: i32 },

    /// The requested stay overlaps an existing reservation for the same villa.
    #[error("Reservation dates overlap with an existing reservation for villa {villa_id}")]
    DateConflict { villa_id: DbId },

    /// A collaborator service call failed or timed out.
    #[error("Upstream service {service} unavailable: {reason}")]
    UpstreamUnavailable {
        service: &'static str,
        reason: String,
    },
}
