//! Listing queries and the paginated-query engine

use crate::core::error::{StoreError, ValidationErrors};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Page size used when a query does not specify one
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Columns a listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortColumn {
    #[default]
    Code,
    Name,
    Description,
    Price,
}

impl SortColumn {
    /// Resolve a user-supplied column name
    ///
    /// Matching is case-insensitive. Unknown or absent names resolve to
    /// [`SortColumn::Code`].
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("name") => SortColumn::Name,
            Some("description") => SortColumn::Description,
            Some("price") => SortColumn::Price,
            _ => SortColumn::Code,
        }
    }

    /// Column name as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Code => "code",
            SortColumn::Name => "name",
            SortColumn::Description => "description",
            SortColumn::Price => "price",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` (any case) is descending, anything else ascending
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, SortOrder::Desc)
    }
}

/// Input to a product listing
///
/// Sort column and order are kept as the caller sent them; they are resolved
/// leniently by [`sort_column`](Self::sort_column) and
/// [`sort_order`](Self::sort_order).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductQuery {
    /// Free-text search over name and description
    #[serde(alias = "searchItem")]
    pub search_term: Option<String>,

    /// One of `code`, `name`, `description`, `price`
    pub sort_column: Option<String>,

    /// `asc` or `desc`
    pub sort_order: Option<String>,

    /// Page number (starts at 1)
    pub page: i64,

    /// Number of items per page
    pub page_size: i64,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            search_term: None,
            sort_column: None,
            sort_order: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProductQuery {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page,
            page_size,
            ..Self::default()
        }
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn with_sort(mut self, column: impl Into<String>, order: impl Into<String>) -> Self {
        self.sort_column = Some(column.into());
        self.sort_order = Some(order.into());
        self
    }

    /// Search term, trimmed; `None` when absent or blank
    pub fn search(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    pub fn sort_column(&self) -> SortColumn {
        SortColumn::parse(self.sort_column.as_deref())
    }

    pub fn sort_order(&self) -> SortOrder {
        SortOrder::parse(self.sort_order.as_deref())
    }

    /// Checked page window of this query
    pub fn page_request(&self) -> Result<PageRequest, ValidationErrors> {
        PageRequest::new(self.page, self.page_size)
    }
}

/// A validated page window: 1-based page, positive page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl PageRequest {
    /// Reject a page below 1 or a page size below 1
    pub fn new(page: i64, page_size: i64) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if page < 1 {
            errors.push("page", format!("'page' must be at least 1 (value: {})", page));
        }
        if page_size < 1 {
            errors.push(
                "pageSize",
                format!("'pageSize' must be at least 1 (value: {})", page_size),
            );
        }
        errors.into_result()?;

        Ok(Self {
            page: page as u64,
            page_size: page_size as u64,
        })
    }

    /// Number of items before this page
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Current page number (starts at 1)
    pub page: u64,

    /// Number of items per page
    pub page_size: u64,

    /// Total number of items (after filters)
    pub total: u64,

    /// Total number of pages
    pub total_pages: u64,

    /// Whether there is a previous page
    pub has_previous_page: bool,

    /// Whether there is a next page
    pub has_next_page: bool,
}

impl PageMeta {
    /// Create pagination metadata from calculation
    pub fn new(request: PageRequest, total: u64) -> Self {
        let total_pages = total.div_ceil(request.page_size);

        Self {
            page: request.page,
            page_size: request.page_size,
            total,
            total_pages,
            has_previous_page: request.page > 1,
            has_next_page: request.page < total_pages,
        }
    }
}

/// One page of an ordered collection plus its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult<T> {
    /// The items of the requested page, in view order
    pub items: Vec<T>,

    /// Pagination metadata
    pub pagination: PageMeta,
}

impl<T> PageResult<T> {
    /// Project every item, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// An already filtered and sorted view that can be counted and windowed
///
/// Stores implement this so that counting and offset/limit are pushed down
/// to the backend instead of materializing the whole collection.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    /// Number of items in the view
    async fn count(&self) -> Result<u64, StoreError>;

    /// Up to `limit` items starting at `offset`, in view order
    async fn fetch(&self, offset: u64, limit: u64) -> Result<Vec<Self::Item>, StoreError>;
}

/// Compute one page of `source`
///
/// Performs one count pass and, when the window is not past the end, one
/// bounded fetch pass. A page beyond the last one yields no items but the
/// correct totals.
pub async fn paginate<S>(source: &S, request: PageRequest) -> Result<PageResult<S::Item>, StoreError>
where
    S: PageSource + ?Sized,
{
    let total = source.count().await?;
    let pagination = PageMeta::new(request, total);

    let items = if request.offset() >= total {
        Vec::new()
    } else {
        source.fetch(request.offset(), request.page_size).await?
    };

    Ok(PageResult { items, pagination })
}
