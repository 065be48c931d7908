//! Handlers for the Reservation Ledger.
//!
//! Members book and read their own reservations. The booked-dates listing
//! for a villa is public. Admin routes see and delete every reservation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use villa_core::error::CoreError;
use villa_core::types::DbId;
use villa_db::models::reservation::{Reservation, ReservationDateRange, ReservationRequest};
use villa_db::repositories::ReservationRepo;

use crate::booking;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

fn reservation_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Reservation",
        id,
    })
}

// ---------------------------------------------------------------------------
// Member routes
// ---------------------------------------------------------------------------

/// POST /api/v1/reservations
///
/// Book a villa for the caller. The total price is computed server-side.
pub async fn create_reservation(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ReservationRequest>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let reservation =
        booking::create_reservation(&state.pool, state.villas.as_ref(), auth.user_id, &input)
            .await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// GET /api/v1/reservations
pub async fn list_my_reservations(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = ReservationRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(reservations))
}

/// GET /api/v1/reservations/{id}
///
/// Reservations owned by someone else are reported as not found.
pub async fn get_my_reservation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Reservation>> {
    let reservation = ReservationRepo::find_by_id_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| reservation_not_found(id))?;
    Ok(Json(reservation))
}

// ---------------------------------------------------------------------------
// Public availability
// ---------------------------------------------------------------------------

/// GET /api/v1/reservations/villa/{villa_id}/dates
///
/// Booked date ranges for a villa, for availability calendars.
pub async fn list_villa_dates(
    State(state): State<AppState>,
    Path(villa_id): Path<DbId>,
) -> AppResult<Json<Vec<ReservationDateRange>>> {
    if state.villas.fetch_rates(villa_id).await?.is_none() {
        return Err(CoreError::VillaNotFound(villa_id).into());
    }
    let dates = ReservationRepo::list_date_ranges_by_villa(&state.pool, villa_id).await?;
    Ok(Json(dates))
}

// ---------------------------------------------------------------------------
// Admin routes
// ---------------------------------------------------------------------------

/// GET /api/v1/reservations/admin/all
pub async fn admin_list_all(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = ReservationRepo::list_all(&state.pool).await?;
    Ok(Json(reservations))
}

/// GET /api/v1/reservations/admin/user/{user_id}
///
/// A user without reservations yields an empty list.
pub async fn admin_list_by_user(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = ReservationRepo::list_by_user(&state.pool, user_id).await?;
    Ok(Json(reservations))
}

/// DELETE /api/v1/reservations/admin/{id}
pub async fn admin_delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ReservationRepo::delete(&state.pool, id).await? {
        return Err(reservation_not_found(id));
    }

    tracing::info!(reservation_id = id, user_id = admin.user_id, "Reservation deleted");

    Ok(StatusCode::NO_CONTENT)
}
