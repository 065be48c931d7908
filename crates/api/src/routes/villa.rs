//! Route definitions for the Villa Directory.

use axum::routing::get;
use axum::Router;

use crate::handlers::villa;
use crate::state::AppState;

/// Villa routes mounted at `/villas`.
///
/// ```text
/// GET    /        -> list_villas (public)
/// POST   /        -> create_villa (admin only, multipart)
/// GET    /{id}    -> get_villa (public)
/// PUT    /{id}    -> update_villa (admin only, multipart)
/// DELETE /{id}    -> delete_villa (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(villa::list_villas).post(villa::create_villa))
        .route(
            "/{id}",
            get(villa::get_villa)
                .put(villa::update_villa)
                .delete(villa::delete_villa),
        )
}
