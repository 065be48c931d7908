//! Route definitions for the Reservation Ledger.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::reservation;
use crate::state::AppState;

/// Reservation routes mounted at `/reservations`.
///
/// ```text
/// POST   /                        -> create_reservation
/// GET    /                        -> list_my_reservations
/// GET    /{id}                    -> get_my_reservation
/// GET    /villa/{villa_id}/dates  -> list_villa_dates (public)
/// GET    /admin/all               -> admin_list_all (admin only)
/// GET    /admin/user/{user_id}    -> admin_list_by_user (admin only)
/// DELETE /admin/{id}              -> admin_delete (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reservation::list_my_reservations).post(reservation::create_reservation),
        )
        .route("/{id}", get(reservation::get_my_reservation))
        .route("/villa/{villa_id}/dates", get(reservation::list_villa_dates))
        .route("/admin/all", get(reservation::admin_list_all))
        .route("/admin/user/{user_id}", get(reservation::admin_list_by_user))
        .route("/admin/{id}", delete(reservation::admin_delete))
}
