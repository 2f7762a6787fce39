//! In-process [`EmployeeStore`] with the same listing semantics as PostgreSQL.
//!
//! Used by the API integration tests and by `STORE_BACKEND=memory` for
//! running the server without a database. Ordering approximates PostgreSQL
//! with a linguistic collation: text compares case-insensitively, NULLs
//! sort last ascending and first descending, ties break on `id ASC`.

use std::cmp::Ordering;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use roster_core::employee::{EmployeeUpdate, NewEmployee};
use roster_core::listing::{ListingQuery, PageSize, SortColumn, SortOrder};
use roster_core::types::DbId;

use crate::models::employee::{DeletedEmployee, Employee};
use crate::store::{EmployeeStore, ListingPage, StoreError};

#[derive(Default)]
struct Inner {
    rows: Vec<Employee>,
    last_id: DbId,
    unavailable: bool,
}

/// Thread-safe in-memory record store.
#[derive(Default)]
pub struct MemoryEmployeeStore {
    inner: Mutex<Inner>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Number of stored rows, ignoring availability.
    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn available(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        let guard = self.lock();
        if guard.unavailable {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(guard)
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn list(&self, query: &ListingQuery) -> Result<ListingPage, StoreError> {
        let inner = self.available()?;
        let needle = query.search.as_deref().map(str::to_lowercase);

        let mut matched: Vec<Employee> = inner
            .rows
            .iter()
            .filter(|e| {
                query
                    .designation
                    .as_deref()
                    .map_or(true, |d| e.designation == d)
            })
            .filter(|e| needle.as_deref().map_or(true, |n| matches_search(e, n)))
            .cloned()
            .collect();

        matched.sort_by(|a, b| {
            compare_by(a, b, query.sort_by, query.order).then_with(|| a.id.cmp(&b.id))
        });

        let total = matched.len() as i64;
        let rows = match query.page_size {
            PageSize::All => matched,
            PageSize::Limited(limit) => matched
                .into_iter()
                .skip(usize::try_from(query.offset()).unwrap_or(usize::MAX))
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .collect(),
        };

        Ok(ListingPage { rows, total })
    }

    async fn create(&self, input: &NewEmployee) -> Result<Employee, StoreError> {
        let mut inner = self.available()?;
        inner.last_id += 1;
        let employee = Employee {
            id: inner.last_id,
            image: input.image.clone(),
            name: input.name.clone(),
            age: input.age,
            designation: input.designation.clone(),
            details: input.details.clone(),
        };
        inner.rows.push(employee.clone());
        Ok(employee)
    }

    async fn find(&self, id: DbId) -> Result<Option<Employee>, StoreError> {
        let inner = self.available()?;
        Ok(inner.rows.iter().find(|e| e.id == id).cloned())
    }

    async fn update(
        &self,
        id: DbId,
        input: &EmployeeUpdate,
    ) -> Result<Option<Employee>, StoreError> {
        let mut inner = self.available()?;
        let Some(row) = inner.rows.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        row.name = input.name.clone();
        row.age = input.age;
        row.details = input.details.clone();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<Option<DeletedEmployee>, StoreError> {
        let mut inner = self.available()?;
        let Some(pos) = inner.rows.iter().position(|e| e.id == id) else {
            return Ok(None);
        };
        let removed = inner.rows.remove(pos);
        Ok(Some(DeletedEmployee {
            id: removed.id,
            image: removed.image,
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.available().map(|_| ())
    }
}

/// Case-insensitive substring match on name or details. `needle` is lowercase.
fn matches_search(employee: &Employee, needle: &str) -> bool {
    employee.name.to_lowercase().contains(needle)
        || employee
            .details
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

fn compare_by(a: &Employee, b: &Employee, column: SortColumn, order: SortOrder) -> Ordering {
    let ordering = match column {
        SortColumn::Id => a.id.cmp(&b.id),
        SortColumn::Image => nulls_last(&a.image, &b.image),
        SortColumn::Name => text_cmp(&a.name, &b.name),
        SortColumn::Age => a.age.cmp(&b.age),
        SortColumn::Designation => text_cmp(&a.designation, &b.designation),
        SortColumn::Details => nulls_last(&a.details, &b.details),
    };
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

/// Case-insensitive first, byte order only between case variants.
fn text_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn nulls_last(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => text_cmp(a, b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}
