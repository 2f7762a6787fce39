//! Async controller for the employee table.
//!
//! Each change reduces [`TableState`], fetches, then applies the reply.
//! Mutations re-fetch the current page once the server confirms them.

use roster_core::listing::SortColumn;
use roster_core::types::DbId;

use crate::api::EmployeesApi;
use crate::error::ClientError;
use crate::models::{CreatedEmployee, EmployeeChanges, EmployeeDraft, EmployeeRow};
use crate::state::{ListRequest, TableState};

pub struct EmployeeController<A> {
    api: A,
    state: TableState,
}

impl<A: EmployeesApi> EmployeeController<A> {
    pub fn new(api: A) -> Self {
        Self::with_state(api, TableState::default())
    }

    pub fn with_state(api: A, state: TableState) -> Self {
        Self { api, state }
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the current page. Also used for the initial load.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let request = self.state.request();
        self.fetch(request).await
    }

    pub async fn change_page(&mut self, page: i64) -> Result<(), ClientError> {
        let request = self.state.change_page(page);
        self.fetch(request).await
    }

    pub async fn change_limit(&mut self, limit: i64) -> Result<(), ClientError> {
        let request = self.state.change_limit(limit);
        self.fetch(request).await
    }

    pub async fn change_sort(&mut self, column: SortColumn) -> Result<(), ClientError> {
        let request = self.state.change_sort(column);
        self.fetch(request).await
    }

    pub async fn change_search(&mut self, search: &str) -> Result<(), ClientError> {
        let request = self.state.change_search(search);
        self.fetch(request).await
    }

    pub async fn change_designation(
        &mut self,
        designation: Option<&str>,
    ) -> Result<(), ClientError> {
        let request = self.state.change_designation(designation);
        self.fetch(request).await
    }

    pub async fn create(&mut self, draft: &EmployeeDraft) -> Result<CreatedEmployee, ClientError> {
        let created = self.api.create(draft).await?;
        tracing::debug!(employee_id = created.id, "Employee created, reloading");
        self.refresh().await?;
        Ok(created)
    }

    pub async fn update(
        &mut self,
        id: DbId,
        changes: &EmployeeChanges,
    ) -> Result<EmployeeRow, ClientError> {
        let updated = self.api.update(id, changes).await?;
        self.refresh().await?;
        Ok(updated)
    }

    pub async fn remove(&mut self, id: DbId) -> Result<(), ClientError> {
        self.api.delete(id).await?;
        self.refresh().await
    }

    async fn fetch(&mut self, request: ListRequest) -> Result<(), ClientError> {
        self.state.begin_load();
        match self.api.list(&request).await {
            Ok(response) => {
                self.state.apply_listing(response);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load employees");
                self.state.load_failed();
                Err(e)
            }
        }
    }
}
