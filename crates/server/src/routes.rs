use std::{path::PathBuf, sync::Arc};

use axum::{
    extract::{multipart::MultipartError, Multipart, State as AxumState},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use deepshield_core::{
    client::detect_response::{DetectResponse, HealthResponse},
    pipeline::pipeline_logger::LogPipelineLogger,
    shared::{
        constants::{FAKE_MEDIA_FIELD, REAL_MEDIA_FIELD},
        media::{check_size, secure_filename},
    },
};
use tracing::{debug, info, warn};

use super::{error::AppError, state::State};

/// One uploaded file as received. `bytes` is cleared once the size limit
/// is crossed; the rest of the part is still drained.
struct Upload {
    file_name: String,
    bytes: Vec<u8>,
    oversize: bool,
}

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: chrono::Local::now().to_rfc3339(),
        }),
    )
}

pub async fn detect_handler(
    AxumState(state): AxumState<Arc<State>>,
    multipart: Multipart,
) -> Result<Json<DetectResponse>, AppError> {
    let limit = state.config.max_upload_bytes;
    let (real, fake) = read_uploads(multipart, limit).await?;

    let (Some(real), Some(fake)) = (real, fake) else {
        return Err(AppError::MissingFiles);
    };
    if real.oversize || fake.oversize {
        return Err(AppError::too_large(limit));
    }

    // Everything written for this request lives under one directory that is
    // removed when `request_dir` drops, on success and on every error path.
    let request_dir = tempfile::Builder::new()
        .prefix("request-")
        .tempdir_in(&state.config.media_dir)?;
    let real_path = save(request_dir.path().join("real"), &real).await?;
    let fake_path = save(request_dir.path().join("fake"), &fake).await?;
    debug!(
        "Saving files to: {} and {}",
        real_path.display(),
        fake_path.display()
    );

    let comparer = state.comparer.clone();
    let report = tokio::task::spawn_blocking(move || {
        let mut logger = LogPipelineLogger::new();
        comparer.execute(&real_path, &fake_path, &mut logger)
    })
    .await
    .map_err(|e| AppError::Internal(format!("comparison task failed: {e}")))??;

    if let Err(e) = request_dir.close() {
        warn!("Could not clean up request directory: {e}");
    }

    info!(
        "Compared {} with {}: cosine {:.4}",
        real.file_name, fake.file_name, report.cosine_similarity
    );
    Ok(Json(DetectResponse::completed(&report)))
}

async fn read_uploads(
    mut multipart: Multipart,
    limit: u64,
) -> Result<(Option<Upload>, Option<Upload>), AppError> {
    let mut real = None;
    let mut fake = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let slot = match field.name() {
            Some(REAL_MEDIA_FIELD) => &mut real,
            Some(FAKE_MEDIA_FIELD) => &mut fake,
            _ => continue,
        };

        let mut upload = Upload {
            file_name: field.file_name().unwrap_or_default().to_string(),
            bytes: Vec::new(),
            oversize: false,
        };
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(e, limit))?
        {
            if upload.oversize {
                continue;
            }
            if check_size((upload.bytes.len() + chunk.len()) as u64, limit).is_err() {
                upload.oversize = true;
                upload.bytes = Vec::new();
            } else {
                upload.bytes.extend_from_slice(&chunk);
            }
        }
        *slot = Some(upload);
    }

    Ok((real, fake))
}

/// A request body over the router's limit is reported like an oversize file.
fn multipart_error(e: MultipartError, limit: u64) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::too_large(limit)
    } else {
        e.into()
    }
}

async fn save(dir: PathBuf, upload: &Upload) -> Result<PathBuf, AppError> {
    tokio::fs::create_dir_all(&dir).await?;
    let path = dir.join(secure_filename(&upload.file_name));
    tokio::fs::write(&path, &upload.bytes).await?;
    Ok(path)
}
