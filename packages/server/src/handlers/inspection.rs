use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::upload::read_image_upload;
use crate::models::inspection::{
    CreateInspectionRequest, InspectionResponse, UpdateInspectionRequest,
};
use crate::models::upload::UploadResponse;
use crate::services::InspectionService;
use crate::state::AppState;

fn service(state: &AppState) -> InspectionService<'_> {
    InspectionService::new(&state.db, &*state.images)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Inspections",
    operation_id = "listInspections",
    summary = "List all inspections",
    responses(
        (status = 200, description = "All inspections with their transformer", body = Vec<InspectionResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_inspections(
    State(state): State<AppState>,
) -> Result<Json<Vec<InspectionResponse>>, AppError> {
    let records = service(&state).list().await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/transformer/{transformer_id}",
    tag = "Inspections",
    operation_id = "listInspectionsByTransformer",
    summary = "List inspections of one transformer",
    params(("transformer_id" = i32, Path, description = "Transformer ID")),
    responses(
        (status = 200, description = "Inspections of the transformer (empty if none)", body = Vec<InspectionResponse>),
    ),
)]
#[instrument(skip(state), fields(transformer_id))]
pub async fn list_by_transformer(
    State(state): State<AppState>,
    Path(transformer_id): Path<i32>,
) -> Result<Json<Vec<InspectionResponse>>, AppError> {
    let records = service(&state).list_by_transformer(transformer_id).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/transformer/{transformer_id}/latest",
    tag = "Inspections",
    operation_id = "latestInspectionForTransformer",
    summary = "Most recent inspection of a transformer",
    description = "Ordered by inspection date (undated inspections last), then by newest ID.",
    params(("transformer_id" = i32, Path, description = "Transformer ID")),
    responses(
        (status = 200, description = "Latest inspection", body = InspectionResponse),
        (status = 404, description = "No inspections (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(transformer_id))]
pub async fn latest_for_transformer(
    State(state): State<AppState>,
    Path(transformer_id): Path<i32>,
) -> Result<Json<InspectionResponse>, AppError> {
    let record = service(&state).latest_for_transformer(transformer_id).await?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Inspections",
    operation_id = "createInspection",
    summary = "Record an inspection",
    description = "The transformer is given as `transformer: {id}` or `transformerId` and must exist. `progressStatus` defaults to `Pending`.",
    request_body = CreateInspectionRequest,
    responses(
        (status = 201, description = "Inspection created", body = InspectionResponse),
        (status = 400, description = "Missing or unknown transformer (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_inspection(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateInspectionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let transformer_id = payload.transformer_id()?;
    let record = service(&state)
        .create(transformer_id, payload.fields())
        .await?;
    Ok((StatusCode::CREATED, Json(InspectionResponse::from(record))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Inspections",
    operation_id = "getInspection",
    summary = "Get an inspection by ID",
    params(("id" = i32, Path, description = "Inspection ID")),
    responses(
        (status = 200, description = "Inspection details", body = InspectionResponse),
        (status = 404, description = "Inspection not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_inspection(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<InspectionResponse>, AppError> {
    let record = service(&state).get(id).await?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Inspections",
    operation_id = "updateInspection",
    summary = "Replace an inspection's details",
    description = "Overwrites date, inspector, notes and progressStatus. The transformer reference and maintenance image fields are not changed.",
    params(("id" = i32, Path, description = "Inspection ID")),
    request_body = UpdateInspectionRequest,
    responses(
        (status = 200, description = "Inspection updated", body = InspectionResponse),
        (status = 400, description = "Malformed body (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Inspection not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_inspection(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateInspectionRequest>,
) -> Result<Json<InspectionResponse>, AppError> {
    let record = service(&state).update(id, payload.fields()).await?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Inspections",
    operation_id = "deleteInspection",
    summary = "Delete an inspection",
    params(("id" = i32, Path, description = "Inspection ID")),
    responses(
        (status = 204, description = "Inspection deleted"),
        (status = 404, description = "Inspection not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_inspection(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/upload-maintenance",
    tag = "Inspections",
    operation_id = "uploadMaintenanceImage",
    summary = "Upload a maintenance photograph",
    description = "Multipart form with a `file` part and a `weather` text part. The weather is stored on the inspection, separately from the transformer's baseline weather.",
    params(("id" = i32, Path, description = "Inspection ID")),
    request_body(content_type = "multipart/form-data", description = "Image file and weather"),
    responses(
        (status = 200, description = "Image stored and linked", body = UploadResponse),
        (status = 400, description = "Empty file or malformed form (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Inspection not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Writing the file failed (UPLOAD_FAILED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart), fields(id))]
pub async fn upload_maintenance(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let upload = read_image_upload(multipart, state.config.storage.max_upload_size).await?;

    let linked = service(&state)
        .upload_maintenance(id, &upload.data, &upload.file_name, &upload.weather)
        .await?;

    Ok(Json(UploadResponse::new(
        linked.public_path,
        linked.uploaded_at,
        linked.weather,
    )))
}
