//! Repository for the `employees` table.

use sqlx::{PgConnection, PgPool};
use roster_core::employee::{EmployeeUpdate, NewEmployee};
use roster_core::types::DbId;

use crate::listing::ListingSql;
use crate::models::employee::{DeletedEmployee, Employee};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, image, name, age, designation, details";

/// Provides CRUD operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Count rows matching the listing filters.
    pub async fn count(conn: &mut PgConnection, sql: &ListingSql) -> Result<i64, sqlx::Error> {
        let mut q = sqlx::query_scalar::<_, i64>(&sql.count_sql);
        for value in &sql.filter_binds {
            q = q.bind(value.as_str());
        }
        q.fetch_one(&mut *conn).await
    }

    /// Fetch one page (or every row in all-rows mode) of the listing.
    pub async fn list_page(
        conn: &mut PgConnection,
        sql: &ListingSql,
    ) -> Result<Vec<Employee>, sqlx::Error> {
        let mut q = sqlx::query_as::<_, Employee>(&sql.page_sql);
        for value in &sql.filter_binds {
            q = q.bind(value.as_str());
        }
        if let Some((limit, offset)) = sql.paging {
            q = q.bind(limit).bind(offset);
        }
        q.fetch_all(&mut *conn).await
    }

    /// Insert a new employee, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees (image, name, age, designation, details)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(input.image.as_deref())
            .bind(&input.name)
            .bind(input.age)
            .bind(&input.designation)
            .bind(input.details.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Find an employee by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite name, age and details. Image and designation are untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &EmployeeUpdate,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET
                name = $2,
                age = $3,
                details = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.age)
            .bind(input.details.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete an employee and hand back its image path in the same statement.
    ///
    /// Returns `None` if no row was removed.
    pub async fn delete_returning(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DeletedEmployee>, sqlx::Error> {
        sqlx::query_as::<_, DeletedEmployee>(
            "DELETE FROM employees WHERE id = $1 RETURNING id, image",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
