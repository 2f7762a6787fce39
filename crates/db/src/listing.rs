//! SQL for the paged employee listing.
//!
//! The count and page statements share one `WHERE` clause so the reported
//! total always describes the filtered set. Only allow-listed column names
//! and fixed keywords are formatted into the SQL; every user value is a
//! bound parameter.

use roster_core::listing::{ListingQuery, PageSize};

use crate::repositories::employee_repo::COLUMNS;

/// Rendered statements for one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSql {
    /// `SELECT COUNT(*) ...` over the filtered set.
    pub count_sql: String,
    /// `SELECT <columns> ... ORDER BY ... [LIMIT .. OFFSET ..]`.
    pub page_sql: String,
    /// Filter values, bound in order to both statements.
    pub filter_binds: Vec<String>,
    /// `(limit, offset)` bound after the filters on the page statement.
    pub paging: Option<(i64, i64)>,
}

/// Render the count and page statements for `query`.
pub fn build_listing_sql(query: &ListingQuery) -> ListingSql {
    let mut conditions = Vec::new();
    let mut filter_binds = Vec::new();
    let mut bind_idx = 1u32;

    if let Some(designation) = &query.designation {
        conditions.push(format!("designation = ${bind_idx}"));
        filter_binds.push(designation.clone());
        bind_idx += 1;
    }
    // Backslash is PostgreSQL's default LIKE escape, matching `escape_like`.
    if let Some(pattern) = query.search_pattern() {
        conditions.push(format!(
            "(name ILIKE ${bind_idx} OR details ILIKE ${bind_idx})"
        ));
        filter_binds.push(pattern);
        bind_idx += 1;
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) FROM employees{where_clause}");

    let column = query.sort_by.column();
    let direction = query.order.as_sql();
    let tiebreak = if column == "id" { "" } else { ", id ASC" };

    let (limit_clause, paging) = match query.page_size {
        PageSize::All => (String::new(), None),
        PageSize::Limited(limit) => (
            format!(" LIMIT ${bind_idx} OFFSET ${}", bind_idx + 1),
            Some((limit, query.offset())),
        ),
    };

    let page_sql = format!(
        "SELECT {COLUMNS} FROM employees{where_clause} \
         ORDER BY {column} {direction}{tiebreak}{limit_clause}"
    );

    ListingSql {
        count_sql,
        page_sql,
        filter_binds,
        paging,
    }
}

#[cfg(test)]
mod tests {
    use roster_core::listing::{RawListingParams, SortColumn, SortOrder};

    use super::*;

    fn query(f: impl FnOnce(&mut RawListingParams)) -> ListingQuery {
        let mut raw = RawListingParams::default();
        f(&mut raw);
        ListingQuery::from_raw(&raw)
    }

    #[test]
    fn defaults_produce_unfiltered_first_page() {
        let sql = build_listing_sql(&ListingQuery::default());
        assert_eq!(sql.count_sql, "SELECT COUNT(*) FROM employees");
        assert_eq!(
            sql.page_sql,
            format!("SELECT {COLUMNS} FROM employees ORDER BY id ASC LIMIT $1 OFFSET $2")
        );
        assert!(sql.filter_binds.is_empty());
        assert_eq!(sql.paging, Some((10, 0)));
    }

    #[test]
    fn orders_by_each_allowed_column() {
        for column in SortColumn::ALL {
            let q = ListingQuery {
                sort_by: column,
                order: SortOrder::Desc,
                ..ListingQuery::default()
            };
            let sql = build_listing_sql(&q);
            assert!(
                sql.page_sql
                    .contains(&format!("ORDER BY {} DESC", column.column())),
                "{column:?}: {}",
                sql.page_sql
            );
        }
    }

    #[test]
    fn unknown_sort_column_orders_by_id() {
        let q = query(|r| r.sort_by = Some("salary; DROP TABLE employees".into()));
        let sql = build_listing_sql(&q);
        assert!(sql.page_sql.contains("ORDER BY id ASC"));
        assert!(!sql.page_sql.contains("salary"));
    }

    #[test]
    fn non_id_sort_gets_id_tiebreak() {
        let q = query(|r| r.sort_by = Some("Name".into()));
        let sql = build_listing_sql(&q);
        assert!(sql.page_sql.contains("ORDER BY name ASC, id ASC"));
    }

    #[test]
    fn filters_share_where_clause_and_binds() {
        let q = query(|r| {
            r.designation = Some("Manager".into());
            r.search = Some("ann".into());
            r.page = Some("3".into());
            r.limit = Some("5".into());
        });
        let sql = build_listing_sql(&q);
        let where_clause = "WHERE designation = $1 AND (name ILIKE $2 OR details ILIKE $2)";
        assert!(sql.count_sql.ends_with(where_clause));
        assert!(sql.page_sql.contains(where_clause));
        assert!(sql.page_sql.ends_with("LIMIT $3 OFFSET $4"));
        assert_eq!(sql.filter_binds, vec!["Manager".to_string(), "%ann%".to_string()]);
        assert_eq!(sql.paging, Some((5, 10)));
    }

    #[test]
    fn search_only_binds_pattern_first() {
        let q = query(|r| r.search = Some("dev".into()));
        let sql = build_listing_sql(&q);
        assert!(sql.count_sql.ends_with("WHERE (name ILIKE $1 OR details ILIKE $1)"));
        assert!(sql.page_sql.ends_with("LIMIT $2 OFFSET $3"));
    }

    #[test]
    fn all_rows_mode_has_no_limit() {
        let q = query(|r| {
            r.limit = Some("-1".into());
            r.page = Some("4".into());
        });
        let sql = build_listing_sql(&q);
        assert!(!sql.page_sql.contains("LIMIT"));
        assert_eq!(sql.paging, None);
    }

    #[test]
    fn user_values_never_reach_sql_text() {
        let q = query(|r| {
            r.designation = Some("x' OR '1'='1".into());
            r.search = Some("'; DELETE FROM employees; --".into());
        });
        let sql = build_listing_sql(&q);
        assert!(!sql.count_sql.contains('\''));
        assert!(!sql.page_sql.contains('\''));
    }
}
