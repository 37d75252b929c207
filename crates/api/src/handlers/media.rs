//! Handlers for uploaded media (images, audio, video referenced by
//! activity content).

use std::io::Cursor;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use kalvi_core::error::CoreError;
use kalvi_core::media::{sanitize_original_name, stored_path, validate_upload, MediaKind};
use kalvi_core::types::DbId;
use kalvi_db::models::media_asset::{CreateMediaAsset, MediaAsset};
use kalvi_db::repositories::MediaAssetRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireEditor};
use crate::state::AppState;

/// Width and height read from the image header.
///
/// Only the header is decoded, so large images are cheap to inspect.
pub fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32), CoreError> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CoreError::Validation(format!("Unreadable image: {e}")))?
        .into_dimensions()
        .map_err(|e| CoreError::Validation(format!("Unreadable image: {e}")))
}

/// POST /api/v1/media
///
/// Multipart form with a required `file` field. The file is checked against
/// the extension allow-list and size limit, written under the media root
/// with a generated name, and recorded in `media_assets`.
pub async fn upload(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<MediaAsset>)> {
    let mut file_data = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file_data = Some((file_name, content_type, data));
    }

    let (file_name, content_type, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let (kind, ext) = validate_upload(&file_name, data.len() as u64, state.config.media_max_bytes)?;

    let (width, height) = if kind == MediaKind::Image && ext != "svg" {
        let (w, h) = image_dimensions(&data)?;
        (i32::try_from(w).ok(), i32::try_from(h).ok())
    } else {
        (None, None)
    };

    let relative_path = stored_path(kind, &ext);
    let full_path = state.config.media_root.join(&relative_path);
    if let Some(parent) = full_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::InternalError(format!("Cannot create media directory: {e}")))?;
    }
    tokio::fs::write(&full_path, &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Cannot write media file: {e}")))?;

    let input = CreateMediaAsset {
        kind: kind.as_str().to_string(),
        original_name: sanitize_original_name(&file_name),
        stored_path: relative_path,
        content_type,
        size_bytes: data.len() as i64,
        width,
        height,
        uploaded_by: Some(user.user_id),
    };

    let asset = match MediaAssetRepo::create(&state.pool, &input).await {
        Ok(asset) => asset,
        Err(err) => {
            // Do not leave an unreferenced file behind.
            if let Err(io_err) = tokio::fs::remove_file(&full_path).await {
                tracing::warn!(path = %full_path.display(), error = %io_err, "Orphaned media file");
            }
            return Err(err.into());
        }
    };

    tracing::info!(
        media_id = asset.id,
        kind = %kind,
        size_bytes = asset.size_bytes,
        "Stored media upload"
    );
    Ok((StatusCode::CREATED, Json(asset)))
}

/// GET /api/v1/media/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MediaAsset>> {
    let asset = MediaAssetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MediaAsset",
            id,
        }))?;
    Ok(Json(asset))
}
