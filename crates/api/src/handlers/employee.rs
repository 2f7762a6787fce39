//! Handlers for the `/employees` resource.
//!
//! Create accepts multipart form data with attachments; every file received
//! by a request that ends in an error is removed before the error is
//! returned. Delete removes the record's attachment after the row is gone.

use axum::extract::multipart::Field;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use roster_core::employee::{
    validate_employee_update, validate_new_employee, EmployeeForm,
};
use roster_core::error::CoreError;
use roster_core::listing::{ListingQuery, RawListingParams};
use roster_core::types::DbId;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::{CreatedResponse, DataResponse, DeletedResponse, ListResponse};
use crate::state::AppState;
use crate::uploads::StoredUpload;

const ENTITY: &str = "Employee";

/// Multipart field names that carry attachments. `image` is the single-file
/// field older clients send.
const FILE_FIELDS: &[&str] = &["files", "image"];

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// JSON body for `PUT /employees/{id}`.
///
/// `age` is kept as raw JSON so both `31` and `"31"` are accepted.
#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub age: Option<serde_json::Value>,
    pub details: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/employees?page&limit&sortBy&order&designation&search
///
/// Unparseable numbers fall back to defaults instead of failing, and a
/// repeated key keeps its first value.
pub async fn list(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(pairs) = pairs?;
    let query = ListingQuery::from_raw(&RawListingParams::from_pairs(pairs));
    let page = state.store.list(&query).await?;

    Ok(Json(ListResponse {
        success: true,
        total_pages: query.total_pages(page.total),
        data: page.rows,
        total: page.total,
        page: query.reported_page(),
        limit: query.reported_limit(),
    }))
}

/// GET /api/employees/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&raw_id)?;
    let employee = state
        .store
        .find(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(DataResponse::new(employee)))
}

/// POST /api/employees
///
/// Multipart fields: `name`, `age`, `designation`, `details` and any number
/// of `files` (up to the configured maximum). The first file becomes the
/// record's image.
pub async fn create(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<impl IntoResponse> {
    let multipart = multipart?;
    let mut received = Vec::new();

    match create_with_uploads(&state, multipart, &mut received).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(err) => {
            state.uploads.discard(&received).await;
            Err(err)
        }
    }
}

/// PUT /api/employees/{id}
///
/// Overwrites name, age and details; returns the full record. The id is
/// checked before the body.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateEmployeeRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&raw_id)?;
    let Json(input) = body?;
    let update = validate_employee_update(
        input.name.as_deref(),
        input.age.as_ref(),
        input.details.as_deref(),
    )?;

    let employee = state
        .store
        .update(id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(employee_id = id, "Employee updated");
    Ok(Json(DataResponse::new(employee)))
}

/// DELETE /api/employees/{id}
///
/// Removes the row, then its attachment. A missing attachment is logged
/// and does not fail the request.
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&raw_id)?;
    let deleted = state
        .store
        .delete(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    if let Some(image) = deleted.image.as_deref() {
        state.uploads.remove_public_path(image).await;
    }

    tracing::info!(employee_id = deleted.id, "Employee deleted");
    Ok(Json(DeletedResponse {
        success: true,
        message: "Employee deleted successfully",
        rows_affected: 1,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_id(raw: &str) -> AppResult<DbId> {
    raw.trim()
        .parse::<DbId>()
        .map_err(|_| AppError::BadRequest("Invalid ID".into()))
}

/// Read the form, validate it and insert the row.
///
/// Every file written to disk is pushed onto `received` as soon as it
/// exists, so the caller can clean up whichever step fails.
async fn create_with_uploads(
    state: &AppState,
    mut multipart: Multipart,
    received: &mut Vec<StoredUpload>,
) -> AppResult<CreatedResponse> {
    let mut form = EmployeeForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "name" => form.name = Some(field_text(field).await?),
            "age" => form.age = Some(field_text(field).await?),
            "designation" => form.designation = Some(field_text(field).await?),
            "details" => form.details = Some(field_text(field).await?),
            n if FILE_FIELDS.contains(&n) => {
                // Browsers send an empty part when no file was chosen.
                let Some(original) = field.file_name().map(str::to_string) else {
                    continue;
                };
                let data = field.bytes().await?;
                if original.is_empty() && data.is_empty() {
                    continue;
                }
                if received.len() >= state.config.max_upload_files {
                    return Err(AppError::BadRequest(format!(
                        "At most {} files may be uploaded",
                        state.config.max_upload_files
                    )));
                }
                let upload = state
                    .uploads
                    .save(&original, &data)
                    .await
                    .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;
                received.push(upload);
            }
            _ => {} // ignore unknown fields
        }
    }

    let all_images: Vec<String> = received.iter().map(|u| u.public_path.clone()).collect();
    let image_path = all_images.first().cloned();

    let input = validate_new_employee(&form, image_path.clone())?;
    let employee = state.store.create(&input).await?;

    tracing::info!(
        employee_id = employee.id,
        files = all_images.len(),
        "Employee created"
    );

    Ok(CreatedResponse {
        success: true,
        message: "Employee added successfully",
        id: employee.id,
        image_path,
        all_images,
    })
}

async fn field_text(field: Field<'_>) -> AppResult<String> {
    Ok(field.text().await?)
}
