//! Pure filtering and pagination over a book slice.

use crate::{
    book::Book,
    types::{Category, ReadingStatus},
};

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Wire value selecting all statuses.
pub const ALL_BOOKS: &str = "allbooks";
/// Wire value selecting all categories.
pub const ALL_CATEGORIES: &str = "allcategories";

/// Status predicate for the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Match every status.
    #[default]
    All,
    /// Match one status exactly.
    Only(ReadingStatus),
}

impl StatusFilter {
    /// True when `book` passes the predicate.
    pub fn matches(self, book: &Book) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => book.status == status,
        }
    }

    /// Parses a filter wire value (`"allbooks"` or a status name).
    pub fn parse(s: &str) -> Option<Self> {
        if s == ALL_BOOKS {
            return Some(StatusFilter::All);
        }
        ReadingStatus::parse(s).map(StatusFilter::Only)
    }
}

/// Category predicate for the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Match every category.
    #[default]
    All,
    /// Match one category exactly.
    Only(Category),
}

impl CategoryFilter {
    /// True when `book` passes the predicate.
    pub fn matches(self, book: &Book) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => book.category == category,
        }
    }

    /// Parses a filter wire value (`"allcategories"` or a category name).
    pub fn parse(s: &str) -> Option<Self> {
        if s == ALL_CATEGORIES {
            return Some(CategoryFilter::All);
        }
        Category::parse(s).map(CategoryFilter::Only)
    }
}

/// Applies both predicates, AND-combined, preserving input order.
pub fn filter_books<'a>(
    books: &'a [Book],
    status: StatusFilter,
    category: CategoryFilter,
) -> Vec<&'a Book> {
    books
        .iter()
        .filter(|b| status.matches(b) && category.matches(b))
        .collect()
}

/// One computed page of the filtered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Records visible on the effective page.
    pub items: Vec<Book>,
    /// Effective page after clamping, 1-based.
    pub page: usize,
    /// `ceil(filtered / page_size)`; 0 when nothing matches.
    pub page_count: usize,
    /// Size of the unfiltered collection.
    pub total: usize,
    /// Size of the filtered collection.
    pub filtered: usize,
}

/// Filter and page selection for the list view.
///
/// Changing either filter resets the page to 1. The stored page is a
/// request; [`ViewState::page_view`] clamps it against the filtered result,
/// so an out-of-range page can never panic or render an empty middle page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    status: StatusFilter,
    category: CategoryFilter,
    page: usize,
    page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ViewState {
    /// Creates an unfiltered view on page 1.
    ///
    /// A zero `page_size` is bumped to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            status: StatusFilter::All,
            category: CategoryFilter::All,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Current status predicate.
    pub fn status(&self) -> StatusFilter {
        self.status
    }

    /// Current category predicate.
    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    /// Requested page, 1-based.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Fixed page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Sets the status predicate and resets to page 1.
    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
        self.page = 1;
    }

    /// Sets the category predicate and resets to page 1.
    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.page = 1;
    }

    /// Drops both predicates and resets to page 1.
    pub fn clear_filters(&mut self) {
        self.status = StatusFilter::All;
        self.category = CategoryFilter::All;
        self.page = 1;
    }

    /// Requests a page. Zero is treated as 1; overshoot clamps at view time.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Computes the visible slice for the current filters and page.
    ///
    /// Total recomputation from the full collection; no partial or stale
    /// results survive a dependency change.
    pub fn page_view(&self, books: &[Book]) -> PageView {
        let matched = filter_books(books, self.status, self.category);
        let filtered = matched.len();
        let page_count = filtered.div_ceil(self.page_size);
        let page = self.page.clamp(1, page_count.max(1));

        let start = (page - 1) * self.page_size;
        let items = matched
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();

        PageView {
            items,
            page,
            page_count,
            total: books.len(),
            filtered,
        }
    }
}
