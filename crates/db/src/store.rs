//! The record store handle held by the API.
//!
//! Handlers talk to an `Arc<dyn EmployeeStore>` built once at start-up, so
//! tests can swap PostgreSQL for [`crate::memory::MemoryEmployeeStore`].

use async_trait::async_trait;
use roster_core::employee::{EmployeeUpdate, NewEmployee};
use roster_core::listing::ListingQuery;
use roster_core::types::DbId;

use crate::listing::build_listing_sql;
use crate::models::employee::{DeletedEmployee, Employee};
use crate::repositories::EmployeeRepo;
use crate::DbPool;

/// Failures reaching or querying the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// The store refused the operation without a driver error.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// One page of a listing plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub rows: Vec<Employee>,
    pub total: i64,
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Count then fetch the requested page, using the same filters for both.
    async fn list(&self, query: &ListingQuery) -> Result<ListingPage, StoreError>;

    async fn create(&self, input: &NewEmployee) -> Result<Employee, StoreError>;

    async fn find(&self, id: DbId) -> Result<Option<Employee>, StoreError>;

    /// `None` when no row has this id.
    async fn update(
        &self,
        id: DbId,
        input: &EmployeeUpdate,
    ) -> Result<Option<Employee>, StoreError>;

    /// Remove the row, returning its image path. `None` when no row has this id.
    async fn delete(&self, id: DbId) -> Result<Option<DeletedEmployee>, StoreError>;

    /// Reachability check for the health route.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release underlying resources at shutdown.
    async fn close(&self) {}
}

/// [`EmployeeStore`] backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgEmployeeStore {
    pool: DbPool,
}

impl PgEmployeeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn list(&self, query: &ListingQuery) -> Result<ListingPage, StoreError> {
        let sql = build_listing_sql(query);

        // One leased connection for both statements; returned to the pool on drop.
        let mut conn = self.pool.acquire().await?;
        let total = EmployeeRepo::count(&mut conn, &sql).await?;
        let rows = EmployeeRepo::list_page(&mut conn, &sql).await?;

        tracing::debug!(
            total,
            returned = rows.len(),
            sort_by = query.sort_by.as_str(),
            "Listed employees"
        );
        Ok(ListingPage { rows, total })
    }

    async fn create(&self, input: &NewEmployee) -> Result<Employee, StoreError> {
        Ok(EmployeeRepo::create(&self.pool, input).await?)
    }

    async fn find(&self, id: DbId) -> Result<Option<Employee>, StoreError> {
        Ok(EmployeeRepo::find_by_id(&self.pool, id).await?)
    }

    async fn update(
        &self,
        id: DbId,
        input: &EmployeeUpdate,
    ) -> Result<Option<Employee>, StoreError> {
        Ok(EmployeeRepo::update(&self.pool, id, input).await?)
    }

    async fn delete(&self, id: DbId) -> Result<Option<DeletedEmployee>, StoreError> {
        Ok(EmployeeRepo::delete_returning(&self.pool, id).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
