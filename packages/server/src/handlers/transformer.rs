use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::upload::read_image_upload;
use crate::models::transformer::{TransformerRequest, TransformerResponse};
use crate::models::upload::UploadResponse;
use crate::services::TransformerService;
use crate::state::AppState;

fn service(state: &AppState) -> TransformerService<'_> {
    TransformerService::new(&state.db, &*state.images)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Transformers",
    operation_id = "listTransformers",
    summary = "List all transformers",
    responses(
        (status = 200, description = "All transformers, ordered by id", body = Vec<TransformerResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_transformers(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransformerResponse>>, AppError> {
    let items = service(&state).list().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Transformers",
    operation_id = "createTransformer",
    summary = "Register a transformer",
    description = "Creates a transformer. `number`, `pole` and `region` are required; the baseline image is attached later via upload.",
    request_body = TransformerRequest,
    responses(
        (status = 201, description = "Transformer created", body = TransformerResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(number = %payload.number))]
pub async fn create_transformer(
    State(state): State<AppState>,
    AppJson(payload): AppJson<TransformerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.validate()?;
    let model = service(&state).create(fields).await?;
    Ok((StatusCode::CREATED, Json(TransformerResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Transformers",
    operation_id = "getTransformer",
    summary = "Get a transformer by ID",
    params(("id" = i32, Path, description = "Transformer ID")),
    responses(
        (status = 200, description = "Transformer details", body = TransformerResponse),
        (status = 404, description = "Transformer not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_transformer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TransformerResponse>, AppError> {
    let model = service(&state).get(id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Transformers",
    operation_id = "updateTransformer",
    summary = "Replace a transformer's details",
    description = "Overwrites number, pole, region, type, location and weather. The baseline image fields are not changed by this call.",
    params(("id" = i32, Path, description = "Transformer ID")),
    request_body = TransformerRequest,
    responses(
        (status = 200, description = "Transformer updated", body = TransformerResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Transformer not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_transformer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<TransformerRequest>,
) -> Result<Json<TransformerResponse>, AppError> {
    let fields = payload.validate()?;
    let model = service(&state).update(id, fields).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Transformers",
    operation_id = "deleteTransformer",
    summary = "Delete a transformer",
    description = "Deletes the transformer and all of its inspections.",
    params(("id" = i32, Path, description = "Transformer ID")),
    responses(
        (status = 204, description = "Transformer deleted"),
        (status = 404, description = "Transformer not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_transformer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/upload-baseline",
    tag = "Transformers",
    operation_id = "uploadBaselineImage",
    summary = "Upload the baseline photograph",
    description = "Multipart form with a `file` part and a `weather` text part. Stores the image and records its path, the upload time and the weather on the transformer.",
    params(("id" = i32, Path, description = "Transformer ID")),
    request_body(content_type = "multipart/form-data", description = "Image file and weather"),
    responses(
        (status = 200, description = "Image stored and linked", body = UploadResponse),
        (status = 400, description = "Empty file or malformed form (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Transformer not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Writing the file failed (UPLOAD_FAILED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart), fields(id))]
pub async fn upload_baseline(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let upload = read_image_upload(multipart, state.config.storage.max_upload_size).await?;

    let linked = service(&state)
        .upload_baseline(id, &upload.data, &upload.file_name, &upload.weather)
        .await?;

    Ok(Json(UploadResponse::new(
        linked.public_path,
        linked.uploaded_at,
        linked.weather,
    )))
}
