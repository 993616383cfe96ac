//! Pagination utilities
//!
//! Fixed page size of 6 recipes. Page numbers are 1-indexed and are not
//! clamped to the last page: a page past the end is simply empty.

/// Page size constant for all listings
pub const PAGE_SIZE: i64 = 6;

/// Pages shown on each side of the current page in the page window
pub const WINDOW_RADIUS: i64 = 2;

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: i64,
    /// Total number of pages
    pub total_pages: i64,
    /// Offset for SQL LIMIT/OFFSET query
    pub offset: i64,
}

impl Pagination {
    /// Infinite-scroll cursor: the following page, or `None` on the last page
    pub fn next_page(&self) -> Option<i64> {
        (self.page < self.total_pages).then_some(self.page + 1)
    }

    pub fn prev_page(&self) -> Option<i64> {
        (self.page > 1).then_some(self.page - 1)
    }
}

/// Parse the `page` query parameter; absent, malformed or non-positive
/// values fall back to page 1
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

/// Offset of a page into the result set
///
/// Saturates for huge page numbers, which then read as an empty page.
pub fn page_offset(page: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(PAGE_SIZE)
}

/// Calculate pagination metadata from total results and requested page
///
/// # Examples
/// ```
/// use cocina_web::pagination::calculate_pagination;
///
/// // 10 total results = 2 pages (6 + 4)
/// let p = calculate_pagination(10, 2);
/// assert_eq!(p.total_pages, 2);
/// assert_eq!(p.offset, 6);
/// assert_eq!(p.next_page(), None);
/// ```
pub fn calculate_pagination(total_results: i64, requested_page: i64) -> Pagination {
    let total_pages = (total_results + PAGE_SIZE - 1) / PAGE_SIZE;
    let page = requested_page.max(1);

    Pagination {
        page,
        total_pages,
        offset: page_offset(page),
    }
}

/// One entry of the rendered page navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page { number: i64, current: bool },
    Ellipsis,
}

/// Page window: current page ± 2, always including the first and last
/// pages, with an ellipsis marker wherever numbers are skipped
pub fn page_window(current: i64, total_pages: i64) -> Vec<PageLink> {
    if total_pages <= 0 {
        return Vec::new();
    }

    let lo = current.saturating_sub(WINDOW_RADIUS).max(1);
    let hi = current.saturating_add(WINDOW_RADIUS).min(total_pages);

    let mut numbers = vec![1];
    numbers.extend((lo..=hi).filter(|n| *n != 1 && *n != total_pages));
    if total_pages != 1 {
        numbers.push(total_pages);
    }

    let mut links = Vec::with_capacity(numbers.len() + 2);
    let mut previous = 0;
    for number in numbers {
        if number > previous + 1 {
            links.push(PageLink::Ellipsis);
        }
        links.push(PageLink::Page {
            number,
            current: number == current,
        });
        previous = number;
    }
    links
}
