//! Wire types exchanged with `/api/employees`.

use roster_core::types::DbId;
use serde::{Deserialize, Serialize};

/// One employee as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRow {
    pub id: DbId,
    pub image: Option<String>,
    pub name: String,
    pub age: i32,
    pub designation: String,
    pub details: Option<String>,
}

/// Body of `GET /api/employees`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    #[serde(default)]
    pub data: Vec<EmployeeRow>,
    #[serde(default)]
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    #[serde(default)]
    pub total_pages: i64,
}

/// Body of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEmployee {
    pub id: DbId,
    pub image_path: Option<String>,
    #[serde(default)]
    pub all_images: Vec<String>,
}

/// Body of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub message: String,
    pub rows_affected: u64,
}

/// `{ "data": T }` envelope used by single-record responses.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// Error body rendered by the API for every failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

/// A file attached to a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Fields of the "add employee" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub name: String,
    pub age: i32,
    pub designation: String,
    pub details: Option<String>,
    pub files: Vec<Attachment>,
}

/// JSON body of `PUT /api/employees/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeChanges {
    pub name: String,
    pub age: i32,
    pub details: Option<String>,
}
