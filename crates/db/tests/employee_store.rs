//! Integration tests for the PostgreSQL-backed employee store.
//!
//! Exercises the repository and listing SQL against a real database:
//! - Create / update / delete round trips
//! - Filtered counts and paging
//! - Sorting by each allowed column

use roster_core::employee::{EmployeeUpdate, NewEmployee};
use roster_core::listing::{ListingQuery, RawListingParams, SortColumn};
use roster_db::store::{EmployeeStore, PgEmployeeStore};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_employee(name: &str, age: i32, designation: &str, details: Option<&str>) -> NewEmployee {
    NewEmployee {
        image: None,
        name: name.to_string(),
        age,
        designation: designation.to_string(),
        details: details.map(str::to_string),
    }
}

async fn seeded(pool: PgPool) -> PgEmployeeStore {
    let store = PgEmployeeStore::new(pool);
    for e in [
        new_employee("Ann", 30, "Manager", Some("Team lead")),
        new_employee("Bob", 25, "Junior Developer", None),
        new_employee("Cara", 41, "Senior Developer", Some("Knows annotations")),
        new_employee("Dan", 35, "Manager", None),
    ] {
        store.create(&e).await.unwrap();
    }
    store
}

fn query(f: impl FnOnce(&mut RawListingParams)) -> ListingQuery {
    let mut raw = RawListingParams::default();
    f(&mut raw);
    ListingQuery::from_raw(&raw)
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_returns_generated_id_and_fields(pool: PgPool) {
    let store = PgEmployeeStore::new(pool);
    let mut input = new_employee("Ann", 30, "Manager", None);
    input.image = Some("/uploads/1-ann.png".into());

    let created = store.create(&input).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.name, "Ann");
    assert_eq!(created.image.as_deref(), Some("/uploads/1-ann.png"));

    let found = store.find(created.id).await.unwrap().unwrap();
    assert_eq!(found, created);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_touches_only_name_age_details(pool: PgPool) {
    let store = PgEmployeeStore::new(pool);
    let mut input = new_employee("Ann", 30, "Manager", None);
    input.image = Some("/uploads/1-ann.png".into());
    let created = store.create(&input).await.unwrap();

    let update = EmployeeUpdate {
        name: "Ann B".into(),
        age: 31,
        details: Some("promoted".into()),
    };
    let updated = store.update(created.id, &update).await.unwrap().unwrap();

    assert_eq!(updated.name, "Ann B");
    assert_eq!(updated.age, 31);
    assert_eq!(updated.details.as_deref(), Some("promoted"));
    assert_eq!(updated.designation, "Manager");
    assert_eq!(updated.image, created.image);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_missing_row_returns_none(pool: PgPool) {
    let store = PgEmployeeStore::new(pool);
    let update = EmployeeUpdate {
        name: "Nobody".into(),
        age: 40,
        details: None,
    };
    assert!(store.update(999_999, &update).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_returns_image_then_none(pool: PgPool) {
    let store = PgEmployeeStore::new(pool);
    let mut input = new_employee("Ann", 30, "Manager", None);
    input.image = Some("/uploads/1-ann.png".into());
    let created = store.create(&input).await.unwrap();

    let deleted = store.delete(created.id).await.unwrap().unwrap();
    assert_eq!(deleted.id, created.id);
    assert_eq!(deleted.image.as_deref(), Some("/uploads/1-ann.png"));

    assert!(store.delete(created.id).await.unwrap().is_none());
    assert!(store.find(created.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn age_check_constraint_rejects_out_of_range(pool: PgPool) {
    let store = PgEmployeeStore::new(pool);
    let result = store.create(&new_employee("Old", 150, "Manager", None)).await;
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn count_reflects_filters_not_page(pool: PgPool) {
    let store = seeded(pool).await;
    let page = store
        .list(&query(|r| {
            r.designation = Some("Manager".into());
            r.limit = Some("1".into());
        }))
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].name, "Ann");
}

#[sqlx::test(migrations = "./migrations")]
async fn search_is_case_insensitive_over_name_and_details(pool: PgPool) {
    let store = seeded(pool).await;
    let page = store
        .list(&query(|r| r.search = Some("ANN".into())))
        .await
        .unwrap();

    let names: Vec<_> = page.rows.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Ann", "Cara"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn search_treats_wildcards_literally(pool: PgPool) {
    let store = seeded(pool).await;
    let page = store
        .list(&query(|r| r.search = Some("%".into())))
        .await
        .unwrap();
    assert_eq!(page.total, 0);
    assert!(page.rows.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn paging_and_all_rows_mode(pool: PgPool) {
    let store = seeded(pool).await;

    let second = store
        .list(&query(|r| {
            r.page = Some("2".into());
            r.limit = Some("3".into());
        }))
        .await
        .unwrap();
    assert_eq!(second.total, 4);
    assert_eq!(second.rows.len(), 1);

    let all = store
        .list(&query(|r| r.limit = Some("-1".into())))
        .await
        .unwrap();
    assert_eq!(all.rows.len(), 4);
}

#[sqlx::test(migrations = "./migrations")]
async fn sorts_by_every_allowed_column(pool: PgPool) {
    let store = seeded(pool).await;

    for column in SortColumn::ALL {
        let asc = store
            .list(&ListingQuery {
                sort_by: column,
                ..ListingQuery::default()
            })
            .await
            .unwrap();
        assert_eq!(asc.rows.len(), 4, "{column:?}");
    }

    let by_age_desc = store
        .list(&query(|r| {
            r.sort_by = Some("Age".into());
            r.order = Some("desc".into());
        }))
        .await
        .unwrap();
    let ages: Vec<_> = by_age_desc.rows.iter().map(|e| e.age).collect();
    assert_eq!(ages, vec![41, 35, 30, 25]);
}

#[sqlx::test(migrations = "./migrations")]
async fn repeated_listing_is_stable(pool: PgPool) {
    let store = seeded(pool).await;
    let q = query(|r| r.sort_by = Some("Designation".into()));
    let first = store.list(&q).await.unwrap();
    let second = store.list(&q).await.unwrap();
    assert_eq!(first, second);
}

#[sqlx::test(migrations = "./migrations")]
async fn ping_succeeds(pool: PgPool) {
    let store = PgEmployeeStore::new(pool);
    assert!(store.ping().await.is_ok());
}
