use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use ragbridge_backend::IngestFormat;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UploadParams {
    pub filename: Option<String>,
}

/// Forward an uploaded file to the backend's ingestion endpoint.
///
/// The request body carries the raw file bytes; the filename travels as a
/// query parameter. Unsupported extensions are rejected here, the backend
/// is never contacted for them.
#[utoipa::path(
    post,
    path = "/api/files/upload",
    params(UploadParams),
    responses(
        (status = 200, description = "Backend ingestion result"),
        (status = 400, description = "Missing filename, empty body, or unsupported extension"),
        (status = 500, description = "Backend rejected the upload")
    ),
    tag = "files"
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let filename = params
        .filename
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Filename is required".to_string()))?;

    if body.is_empty() {
        return Err(ApiError::BadRequest("Request body is empty".to_string()));
    }

    let format = IngestFormat::from_filename(&filename)
        .ok_or_else(|| ApiError::BadRequest("Only CSV and PDF files are supported".to_string()))?;

    let result = state
        .backend
        .upload(format, &filename, body)
        .await
        .map_err(|e| {
            tracing::error!("Upload error: {}", e);
            ApiError::UploadFailed
        })?;

    Ok(Json(result))
}

/// List the files the backend has ingested.
///
/// A backend failure degrades to an empty listing rather than an error,
/// so the file picker renders with nothing selected instead of breaking.
#[utoipa::path(
    get,
    path = "/api/files/list",
    responses(
        (status = 200, description = "JSON array of file descriptors")
    ),
    tag = "files"
)]
pub async fn list_files(State(state): State<Arc<AppState>>) -> Json<Value> {
    match state.backend.list_files().await {
        Ok(files) => Json(files),
        Err(e) => {
            tracing::error!("List files error: {}", e);
            Json(Value::Array(Vec::new()))
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteParams {
    pub fileurl: Option<String>,
}

/// Ask the backend to delete a stored file.
#[utoipa::path(
    delete,
    path = "/api/files/delete",
    params(DeleteParams),
    responses(
        (status = 200, description = "Backend deletion result"),
        (status = 400, description = "Missing file url"),
        (status = 500, description = "Backend rejected the deletion")
    ),
    tag = "files"
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<Json<Value>> {
    let file_url = params
        .fileurl
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ApiError::BadRequest("File url not provided".to_string()))?;

    let result = state.backend.delete_file(&file_url).await.map_err(|e| {
        tracing::error!("Delete file error: {}", e);
        ApiError::DeleteFailed
    })?;

    Ok(Json(result))
}
