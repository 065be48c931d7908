pub mod health;
pub mod reservation;
pub mod villa;

use axum::Router;

use crate::config::ServiceRole;
use crate::state::AppState;

/// Build the `/api/v1` route tree for the given service role.
///
/// Route hierarchy:
///
/// ```text
/// /villas                                  list (public), create (admin)
/// /villas/{id}                             get (public), update, delete (admin)
///
/// /reservations                            create, list own (auth required)
/// /reservations/{id}                       get own (auth required)
/// /reservations/villa/{villa_id}/dates     booked ranges (public)
/// /reservations/admin/all                  list all (admin only)
/// /reservations/admin/user/{user_id}       list by user (admin only)
/// /reservations/admin/{id}                 delete (admin only)
/// ```
///
/// `villas` mounts only the first group, `reservations` only the second.
pub fn api_routes(role: ServiceRole) -> Router<AppState> {
    let mut router = Router::new();

    if role.serves_villas() {
        router = router.nest("/villas", villa::router());
    }
    if role.serves_reservations() {
        router = router.nest("/reservations", reservation::router());
    }

    router
}
