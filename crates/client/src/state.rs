//! Table state for the employee list view.
//!
//! Every `change_*` method updates the parameters and returns the
//! [`ListRequest`] to send. Rows and totals change only in
//! [`TableState::apply_listing`], i.e. from a server reply.

use roster_core::listing::{total_pages, SortColumn, SortOrder};

use crate::models::{EmployeeRow, ListingResponse};

/// Page size the table starts with.
pub const INITIAL_LIMIT: i64 = 5;

/// Parameters of one `GET /api/employees` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub page: i64,
    pub limit: i64,
    pub sort_by: SortColumn,
    pub order: SortOrder,
    pub search: Option<String>,
    pub designation: Option<String>,
}

impl ListRequest {
    /// Query-string pairs. Blank search and designation are left out.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("sortBy", self.sort_by.as_str().to_string()),
            ("order", self.order.as_str().to_string()),
        ];
        if let Some(search) = non_blank(self.search.as_deref()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(designation) = non_blank(self.designation.as_deref()) {
            pairs.push(("designation", designation.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub page: i64,
    /// Rows per page; `-1` once the server reports "all rows" mode.
    pub limit: i64,
    pub sort_by: SortColumn,
    pub order: SortOrder,
    pub search: String,
    pub designation: Option<String>,
    pub rows: Vec<EmployeeRow>,
    pub total: i64,
    pub loading: bool,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            page: 1,
            limit: INITIAL_LIMIT,
            sort_by: SortColumn::Id,
            order: SortOrder::Asc,
            search: String::new(),
            designation: None,
            rows: Vec::new(),
            total: 0,
            loading: false,
        }
    }
}

impl TableState {
    /// Request for the current parameters.
    pub fn request(&self) -> ListRequest {
        ListRequest {
            page: self.page,
            limit: self.limit,
            sort_by: self.sort_by,
            order: self.order,
            search: non_blank(Some(&self.search)).map(|_| self.search.clone()),
            designation: self.designation.clone(),
        }
    }

    pub fn total_pages(&self) -> i64 {
        total_pages(self.total, self.limit)
    }

    pub fn change_page(&mut self, page: i64) -> ListRequest {
        self.page = page;
        self.request()
    }

    pub fn change_limit(&mut self, limit: i64) -> ListRequest {
        self.limit = limit;
        self.page = 1;
        self.request()
    }

    /// Clicking the active column flips the order; a new column starts
    /// ascending.
    pub fn change_sort(&mut self, column: SortColumn) -> ListRequest {
        self.order = if self.sort_by == column {
            self.order.toggled()
        } else {
            SortOrder::Asc
        };
        self.sort_by = column;
        self.page = 1;
        self.request()
    }

    pub fn change_search(&mut self, search: &str) -> ListRequest {
        self.search = search.to_string();
        self.page = 1;
        self.request()
    }

    /// A blank designation clears the filter.
    pub fn change_designation(&mut self, designation: Option<&str>) -> ListRequest {
        self.designation = non_blank(designation).map(str::to_string);
        self.page = 1;
        self.request()
    }

    /// Mark a fetch as in flight.
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replace rows and totals with a server reply and adopt its page and
    /// limit, which may differ from what was asked for.
    pub fn apply_listing(&mut self, response: ListingResponse) {
        self.rows = response.data;
        self.total = response.total;
        if response.page > 0 {
            self.page = response.page;
        }
        self.limit = response.limit;
        self.loading = false;
    }

    /// A fetch failed; rows stay as they were.
    pub fn load_failed(&mut self) {
        self.loading = false;
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
