//! Reservation creation workflow.
//!
//! Preconditions are checked in a fixed order: date ordering and head
//! count (no I/O) → villa existence (collaborator lookup) → capacity →
//! quote bound → overlap. The overlap read and the insert share one transaction holding a
//! per-villa advisory lock; the `ex_reservations_villa_stay` exclusion
//! constraint backs this up at the storage layer. Any failure leaves the
//! ledger untouched.

use villa_core::error::CoreError;
use villa_core::pricing::{
    ensure_available, ensure_capacity, ensure_head_count, ensure_storable_total, quote_total,
};
use villa_core::stay::StayDates;
use villa_core::types::DbId;
use villa_db::models::reservation::{CreateReservation, Reservation, ReservationRequest};
use villa_db::repositories::reservation_repo::OVERLAP_CONSTRAINT;
use villa_db::repositories::ReservationRepo;
use villa_db::DbPool;

use crate::clients::VillaLookup;
use crate::error::AppResult;

/// Validate, price and persist a reservation for `user_id`.
///
/// Inserts exactly one row on success and none on any failure.
pub async fn create_reservation(
    pool: &DbPool,
    villas: &dyn VillaLookup,
    user_id: DbId,
    request: &ReservationRequest,
) -> AppResult<Reservation> {
    let villa_id = request.villa_id;

    // 1. Input checks, before any collaborator call.
    let stay = StayDates::new(request.check_in_date, request.check_out_date)?;
    ensure_head_count(request.people_count)?;

    // 2. Villa existence.
    let rates = villas
        .fetch_rates(villa_id)
        .await?
        .ok_or(CoreError::VillaNotFound(villa_id))?;

    // 3. Capacity, then the price snapshot.
    ensure_capacity(&rates, request.people_count)?;
    let total_price = quote_total(&rates, &stay, request.people_count);
    ensure_storable_total(total_price)?;

    // 4. Overlap check and insert, serialized per villa.
    let mut tx = pool.begin().await?;
    ReservationRepo::lock_villa(&mut tx, villa_id).await?;

    let booked: Vec<StayDates> = ReservationRepo::list_date_ranges_by_villa(&mut *tx, villa_id)
        .await?
        .into_iter()
        .map(StayDates::from)
        .collect();

    if let Err(e) = ensure_available(villa_id, &stay, &booked) {
        tracing::info!(
            villa_id,
            user_id,
            check_in = %stay.check_in,
            check_out = %stay.check_out,
            "Booking rejected: dates overlap an existing reservation"
        );
        return Err(e.into());
    }

    let input = CreateReservation {
        user_id,
        villa_id,
        stay,
        people_count: request.people_count,
        total_price,
    };
    let reservation = ReservationRepo::create(&mut *tx, &input)
        .await
        .map_err(|e| overlap_as_conflict(e, villa_id))?;

    tx.commit().await?;

    tracing::info!(
        reservation_id = reservation.id,
        villa_id,
        user_id,
        nights = stay.nights(),
        total_price = %reservation.total_price,
        "Reservation created"
    );

    Ok(reservation)
}

/// Report a violation of the overlap exclusion constraint as a date conflict.
fn overlap_as_conflict(err: sqlx::Error, villa_id: DbId) -> crate::error::AppError {
    let is_overlap = err
        .as_database_error()
        .is_some_and(|db| db.constraint() == Some(OVERLAP_CONSTRAINT));
    if is_overlap {
        CoreError::DateConflict { villa_id }.into()
    } else {
        err.into()
    }
}
