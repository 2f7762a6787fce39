//! Shared response envelope types for API handlers.
//!
//! Every response carries an explicit `success` flag. Failures are rendered
//! by [`crate::error::AppError`]; the structs here cover the success cases.

use roster_core::types::DbId;
use serde::Serialize;

/// `{ "success": true, "data": T }` envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// One listing page plus pagination metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    /// Page size, or `-1` when every row was returned.
    pub limit: i64,
    pub total_pages: i64,
}

/// Body returned by a successful create.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub success: bool,
    pub message: &'static str,
    pub id: DbId,
    /// Public path of the first uploaded file, also stored as the record image.
    pub image_path: Option<String>,
    /// Public paths of every file received with the request.
    pub all_images: Vec<String>,
}

/// Body returned by a successful delete.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub success: bool,
    pub message: &'static str,
    pub rows_affected: u64,
}
