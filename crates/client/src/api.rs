//! REST client for `/api/employees`.
//!
//! [`EmployeesApi`] is the seam the controller talks to;
//! [`HttpEmployeesApi`] implements it with [`reqwest`].

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use roster_core::types::DbId;
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::models::{
    CreatedEmployee, DataEnvelope, DeleteOutcome, EmployeeChanges, EmployeeDraft, EmployeeRow,
    ErrorBody, ListingResponse,
};
use crate::state::ListRequest;

/// Server address used by the bundled front end.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[async_trait]
pub trait EmployeesApi: Send + Sync {
    async fn list(&self, request: &ListRequest) -> Result<ListingResponse, ClientError>;

    async fn create(&self, draft: &EmployeeDraft) -> Result<CreatedEmployee, ClientError>;

    /// Returns the full record after the update.
    async fn update(&self, id: DbId, changes: &EmployeeChanges)
        -> Result<EmployeeRow, ClientError>;

    async fn delete(&self, id: DbId) -> Result<DeleteOutcome, ClientError>;
}

/// HTTP client for one roster API server.
#[derive(Debug, Clone)]
pub struct HttpEmployeesApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpEmployeesApi {
    /// * `base_url` - Server root, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn employees_url(&self) -> String {
        format!("{}/api/employees", self.base_url)
    }

    fn employee_url(&self, id: DbId) -> String {
        format!("{}/api/employees/{id}", self.base_url)
    }

    /// Decode a 2xx body as `T`; anything else becomes [`ClientError::Api`].
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl EmployeesApi for HttpEmployeesApi {
    async fn list(&self, request: &ListRequest) -> Result<ListingResponse, ClientError> {
        let response = self
            .client
            .get(self.employees_url())
            .query(&request.query_pairs())
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn create(&self, draft: &EmployeeDraft) -> Result<CreatedEmployee, ClientError> {
        let mut form = Form::new()
            .text("name", draft.name.clone())
            .text("age", draft.age.to_string())
            .text("designation", draft.designation.clone())
            .text("details", draft.details.clone().unwrap_or_default());

        for file in &draft.files {
            let part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
            form = form.part("files", part);
        }

        let response = self
            .client
            .post(self.employees_url())
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn update(
        &self,
        id: DbId,
        changes: &EmployeeChanges,
    ) -> Result<EmployeeRow, ClientError> {
        let response = self
            .client
            .put(self.employee_url(id))
            .json(changes)
            .send()
            .await?;

        let envelope: DataEnvelope<EmployeeRow> = Self::parse_response(response).await?;
        Ok(envelope.data)
    }

    async fn delete(&self, id: DbId) -> Result<DeleteOutcome, ClientError> {
        let response = self.client.delete(self.employee_url(id)).send().await?;

        Self::parse_response(response).await
    }
}
