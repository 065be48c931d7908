//! Reservation entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use villa_core::stay::StayDates;
use villa_core::types::{DbId, Money, Timestamp};

/// A reservation row from the `reservations` table. Never mutated after insert.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reservation {
    pub id: DbId,
    pub user_id: DbId,
    pub villa_id: DbId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub people_count: i32,
    /// Price snapshot taken at creation time.
    pub total_price: Money,
    pub created_at: Timestamp,
}

/// Request body for booking a villa. The user id comes from the caller's token.
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationRequest {
    pub villa_id: DbId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub people_count: i32,
}

/// DTO for inserting a priced, validated reservation.
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub user_id: DbId,
    pub villa_id: DbId,
    pub stay: StayDates,
    pub people_count: i32,
    pub total_price: Money,
}

/// Booked date range for a villa, exposed publicly for availability display.
#[derive(Debug, Clone, Copy, FromRow, Serialize)]
pub struct ReservationDateRange {
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

impl From<ReservationDateRange> for StayDates {
    fn from(range: ReservationDateRange) -> Self {
        // Rows satisfy ck_reservations_date_order, so no re-validation here.
        StayDates {
            check_in: range.check_in_date,
            check_out: range.check_out_date,
        }
    }
}
