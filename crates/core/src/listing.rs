//! Listing parameters for the employee table (paging, sorting, filters).
//!
//! Query-string values arrive untrusted. [`ListingQuery::from_raw`] turns
//! them into a normalized query that the SQL layer can render without ever
//! interpolating user text: sort columns come from a fixed allow-list and
//! every filter value is a bound parameter.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Page used when `page` is missing or not a number.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when `limit` is missing or not a number.
pub const DEFAULT_LIMIT: i64 = 10;

/// Limit reported back to callers in "all rows" mode.
pub const ALL_ROWS_LIMIT: i64 = -1;

/// Character used to escape LIKE metacharacters in search patterns.
pub const LIKE_ESCAPE: char = '\\';

// ---------------------------------------------------------------------------
// Sort column
// ---------------------------------------------------------------------------

/// Columns a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortColumn {
    #[default]
    Id,
    Image,
    Name,
    Age,
    Designation,
    Details,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Id,
        SortColumn::Image,
        SortColumn::Name,
        SortColumn::Age,
        SortColumn::Designation,
        SortColumn::Details,
    ];

    /// Match `raw` against the allow-list, falling back to [`SortColumn::Id`].
    pub fn parse_or_default(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == raw)
            .unwrap_or_default()
    }

    /// Name used on the wire (`sortBy=Name`).
    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::Id => "Id",
            SortColumn::Image => "Image",
            SortColumn::Name => "Name",
            SortColumn::Age => "Age",
            SortColumn::Designation => "Designation",
            SortColumn::Details => "Details",
        }
    }

    /// Column name in the `employees` table.
    pub fn column(self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Image => "image",
            SortColumn::Name => "name",
            SortColumn::Age => "age",
            SortColumn::Designation => "designation",
            SortColumn::Details => "details",
        }
    }
}

// ---------------------------------------------------------------------------
// Sort order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Only a case-insensitive `desc` selects descending order.
    pub fn parse_lenient(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

// ---------------------------------------------------------------------------
// Page size
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    /// Every matching row on a single page.
    All,
    /// At most this many rows per page (always > 0).
    Limited(i64),
}

impl PageSize {
    /// Interpret a raw `limit` value.
    ///
    /// Missing or non-numeric values use [`DEFAULT_LIMIT`]; `all` and any
    /// number `<= 0` select [`PageSize::All`].
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim) else {
            return PageSize::Limited(DEFAULT_LIMIT);
        };
        if raw.eq_ignore_ascii_case("all") {
            return PageSize::All;
        }
        match raw.parse::<i64>() {
            Ok(n) => Self::from_limit(n),
            Err(_) => PageSize::Limited(DEFAULT_LIMIT),
        }
    }

    pub fn from_limit(limit: i64) -> Self {
        if limit > 0 {
            PageSize::Limited(limit)
        } else {
            PageSize::All
        }
    }

    /// Limit echoed in responses: the page size, or `-1` for all rows.
    pub fn reported(self) -> i64 {
        match self {
            PageSize::All => ALL_ROWS_LIMIT,
            PageSize::Limited(n) => n,
        }
    }
}

/// Number of pages for `total` rows at `limit` rows per page.
///
/// Never less than one; a non-positive `limit` means a single page.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit > 0 {
        let pages = total / limit + i64::from(total % limit != 0);
        pages.max(1)
    } else {
        1
    }
}

// ---------------------------------------------------------------------------
// Raw parameters
// ---------------------------------------------------------------------------

/// Listing parameters exactly as they appear in the query string.
///
/// Everything is kept as a string so a malformed number falls back to a
/// default instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListingParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub designation: Option<String>,
    pub search: Option<String>,
}

impl RawListingParams {
    /// Collect parameters from decoded query-string pairs.
    ///
    /// A repeated key keeps its first value; unknown keys are ignored.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "page" => &mut raw.page,
                "limit" => &mut raw.limit,
                "sortBy" => &mut raw.sort_by,
                "order" => &mut raw.order,
                "designation" => &mut raw.designation,
                "search" => &mut raw.search,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        raw
    }
}

// ---------------------------------------------------------------------------
// Normalized query
// ---------------------------------------------------------------------------

/// A validated listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    /// Requested page, always >= 1.
    pub page: i64,
    pub page_size: PageSize,
    pub sort_by: SortColumn,
    pub order: SortOrder,
    /// Exact-match designation filter, bound as received. Never blank.
    pub designation: Option<String>,
    /// Substring search over name and details, trimmed and non-empty.
    pub search: Option<String>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: PageSize::Limited(DEFAULT_LIMIT),
            sort_by: SortColumn::Id,
            order: SortOrder::Asc,
            designation: None,
            search: None,
        }
    }
}

impl ListingQuery {
    pub fn from_raw(raw: &RawListingParams) -> Self {
        let page = raw
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_PAGE)
            .max(1);

        Self {
            page,
            page_size: PageSize::from_raw(raw.limit.as_deref()),
            sort_by: raw
                .sort_by
                .as_deref()
                .map(SortColumn::parse_or_default)
                .unwrap_or_default(),
            order: raw
                .order
                .as_deref()
                .map(SortOrder::parse_lenient)
                .unwrap_or_default(),
            designation: raw
                .designation
                .clone()
                .filter(|d| !d.trim().is_empty()),
            search: non_empty(raw.search.as_deref()),
        }
    }

    /// Rows to skip before the current page. Always 0 in all-rows mode.
    pub fn offset(&self) -> i64 {
        match self.page_size {
            PageSize::All => 0,
            PageSize::Limited(limit) => (self.page - 1).saturating_mul(limit),
        }
    }

    /// Page echoed in responses; forced to 1 in all-rows mode.
    pub fn reported_page(&self) -> i64 {
        match self.page_size {
            PageSize::All => 1,
            PageSize::Limited(_) => self.page,
        }
    }

    pub fn reported_limit(&self) -> i64 {
        self.page_size.reported()
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        total_pages(total, self.page_size.reported())
    }

    /// `%value%` LIKE pattern for the search term, with metacharacters escaped.
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|term| format!("%{}%", escape_like(term)))
    }
}

/// Escape `%`, `_` and the escape character itself so `value` matches literally.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
