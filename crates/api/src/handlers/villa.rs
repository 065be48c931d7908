//! Handlers for the Villa Directory.
//!
//! Reads are public. Create, update and delete require the `admin` role.
//! Create and update take a multipart body: a `villa` field holding the
//! villa JSON and an `image` file that is forwarded to the media service.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use villa_core::error::CoreError;
use villa_core::types::DbId;
use villa_db::models::villa::{Villa, VillaFilter, VillaInput};
use villa_db::repositories::VillaRepo;

use crate::clients::ImageUpload;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Content type assumed when the client does not label the image part.
const DEFAULT_IMAGE_TYPE: &str = "application/octet-stream";

/// Parsed multipart villa form.
struct VillaForm {
    villa: VillaInput,
    image: Option<ImageUpload>,
}

/// Read the `villa` and `image` parts of a multipart body.
///
/// Unknown parts are ignored. The villa JSON is validated here so an invalid
/// villa never reaches the media service.
async fn read_villa_form(mut multipart: Multipart) -> AppResult<VillaForm> {
    let mut villa: Option<VillaInput> = None;
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "villa" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let input: VillaInput = serde_json::from_str(&text).map_err(|e| {
                    CoreError::Validation(format!("Invalid villa payload: {e}"))
                })?;
                villa = Some(input);
            }
            "image" => {
                if image.is_some() {
                    return Err(CoreError::Validation(
                        "Exactly one 'image' file is allowed".into(),
                    )
                    .into());
                }
                let file_name = field.file_name().unwrap_or("villa-image").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_IMAGE_TYPE)
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if bytes.is_empty() {
                    return Err(CoreError::Validation("Image file is empty".into()).into());
                }
                image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let villa = villa.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Missing required 'villa' field".into(),
        ))
    })?;
    villa.validate()?;

    Ok(VillaForm { villa, image })
}

fn villa_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Villa",
        id,
    })
}

/// GET /api/v1/villas
///
/// List villas, optionally filtered by `city`, `min_capacity` and `max_price`.
/// Filters combine conjunctively.
pub async fn list_villas(
    State(state): State<AppState>,
    Query(filter): Query<VillaFilter>,
) -> AppResult<Json<Vec<Villa>>> {
    let villas = VillaRepo::list(&state.pool, &filter).await?;
    Ok(Json(villas))
}

/// GET /api/v1/villas/{id}
pub async fn get_villa(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Villa>> {
    let villa = VillaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| villa_not_found(id))?;
    Ok(Json(villa))
}

/// POST /api/v1/villas
///
/// Create a villa. The `image` part is required.
pub async fn create_villa(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Villa>)> {
    let form = read_villa_form(multipart).await?;
    let image = form.image.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Missing required 'image' field".into(),
        ))
    })?;

    let image_url = state.media.upload(image).await?;
    let villa = VillaRepo::create(&state.pool, &form.villa, &image_url).await?;

    tracing::info!(
        villa_id = villa.id,
        user_id = admin.user_id,
        city = %villa.city,
        "Villa created"
    );

    Ok((StatusCode::CREATED, Json(villa)))
}

/// PUT /api/v1/villas/{id}
///
/// Replace every mutable field. Without an `image` part the current image is kept.
pub async fn update_villa(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Villa>> {
    // A missing villa wins over a bad payload, and skips the upload.
    if VillaRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(villa_not_found(id));
    }

    let form = read_villa_form(multipart).await?;

    let image_url = match form.image {
        Some(image) => Some(state.media.upload(image).await?),
        None => None,
    };

    let villa = VillaRepo::update(&state.pool, id, &form.villa, image_url.as_deref())
        .await?
        .ok_or_else(|| villa_not_found(id))?;

    tracing::info!(
        villa_id = id,
        user_id = admin.user_id,
        image_replaced = image_url.is_some(),
        "Villa updated"
    );

    Ok(Json(villa))
}

/// DELETE /api/v1/villas/{id}
///
/// Existing reservations for the villa are left in place.
pub async fn delete_villa(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !VillaRepo::delete(&state.pool, id).await? {
        return Err(villa_not_found(id));
    }

    tracing::info!(villa_id = id, user_id = admin.user_id, "Villa deleted");

    Ok(StatusCode::NO_CONTENT)
}
