//! Client-side search and pagination for admin tables.
//!
//! The full collection is held in memory. Search is a case-insensitive
//! substring match over a few fields per row type; pagination slices the
//! filtered rows into fixed-size pages.

/// Rows per page.
pub const PAGE_SIZE: usize = 10;

/// A row that can be searched and identified.
pub trait Searchable {
    /// Row identifier used by row actions.
    fn row_id(&self) -> &str;

    /// Whether the row matches `needle`, which is already lowercase.
    fn matches(&self, needle: &str) -> bool;
}

/// Lowercase substring test used by [`Searchable`] impls.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Search and pagination state over a collection.
#[derive(Debug, Clone)]
pub struct AdminTable<T> {
    rows: Vec<T>,
    search: String,
    /// 1-based.
    page: usize,
    page_size: usize,
}

impl<T: Searchable> AdminTable<T> {
    #[must_use]
    pub const fn new(rows: Vec<T>) -> Self {
        Self {
            rows,
            search: String::new(),
            page: 1,
            page_size: PAGE_SIZE,
        }
    }

    /// Use a page size other than [`PAGE_SIZE`]. Zero is treated as one.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Every row, unfiltered.
    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Submit a search. Always returns to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Rows matching the current search, in original order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&T> {
        let needle = self.search.to_lowercase();
        self.rows.iter().filter(|row| row.matches(&needle)).collect()
    }

    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.filtered().len()
    }

    /// Number of pages for the filtered rows; zero when nothing matches.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.filtered_len().div_ceil(self.page_size)
    }

    /// Rows on the current page.
    #[must_use]
    pub fn page_rows(&self) -> Vec<&T> {
        self.filtered()
            .into_iter()
            .skip((self.page - 1) * self.page_size)
            .take(self.page_size)
            .collect()
    }

    /// Go to page `n`. Pages outside `1..=total_pages` are ignored.
    ///
    /// Returns whether the page changed hands to `n`.
    pub fn paginate(&mut self, n: usize) -> bool {
        if n > 0 && n <= self.total_pages() {
            self.page = n;
            true
        } else {
            false
        }
    }

    pub fn first_page(&mut self) -> bool {
        self.paginate(1)
    }

    pub fn previous_page(&mut self) -> bool {
        self.paginate(self.page.saturating_sub(1))
    }

    pub fn next_page(&mut self) -> bool {
        self.paginate(self.page + 1)
    }

    pub fn last_page(&mut self) -> bool {
        self.paginate(self.total_pages())
    }

    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.page >= self.total_pages()
    }

    /// Remove the row with `id` locally. If that empties the current page,
    /// step back to the new last page.
    pub fn remove_row(&mut self, id: &str) -> Option<T> {
        let pos = self.rows.iter().position(|row| row.row_id() == id)?;
        let removed = self.rows.remove(pos);
        let total = self.total_pages();
        if total > 0 && self.page > total {
            self.page = total;
        }
        Some(removed)
    }

    /// `Showing X to Y of Z <noun>`, or `None` when nothing matches.
    #[must_use]
    pub fn summary(&self, noun: &str) -> Option<String> {
        let total = self.filtered_len();
        if total == 0 {
            return None;
        }
        let first = (self.page - 1) * self.page_size + 1;
        let last = (self.page * self.page_size).min(total);
        Some(format!("Showing {first} to {last} of {total} {noun}"))
    }

    /// `Page N of M`.
    #[must_use]
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages())
    }
}

/// What an admin page shows: a table, or a full-page error in its place.
#[derive(Debug, Clone)]
pub enum TableView<T> {
    Ready(AdminTable<T>),
    Failed { message: String },
}

impl<T> TableView<T> {
    #[must_use]
    pub const fn table(&self) -> Option<&AdminTable<T>> {
        match self {
            Self::Ready(table) => Some(table),
            Self::Failed { .. } => None,
        }
    }

    pub const fn table_mut(&mut self) -> Option<&mut AdminTable<T>> {
        match self {
            Self::Ready(table) => Some(table),
            Self::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Failed { message } => Some(message),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        name: String,
    }

    impl Searchable for Row {
        fn row_id(&self) -> &str {
            &self.id
        }

        fn matches(&self, needle: &str) -> bool {
            contains_ignore_case(&self.name, needle)
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (1..=n)
            .map(|i| Row {
                id: i.to_string(),
                name: if i % 2 == 0 { format!("Even {i}") } else { format!("Odd {i}") },
            })
            .collect()
    }

    #[test]
    fn test_pagination_bounds() {
        let mut table = AdminTable::new(rows(25));
        assert_eq!(table.total_pages(), 3);
        assert_eq!(table.page_rows().len(), 10);

        assert!(!table.paginate(0));
        assert!(!table.paginate(4));
        assert_eq!(table.page(), 1);

        assert!(table.last_page());
        assert_eq!(table.page_rows().len(), 5);
        assert!(!table.next_page());
        assert_eq!(table.page(), 3);
        assert!(table.is_last_page());

        assert!(table.first_page());
        assert!(!table.previous_page());
        assert_eq!(table.page(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive_and_resets_page() {
        let mut table = AdminTable::new(rows(25));
        table.paginate(2);

        table.set_search("EVEN");
        assert_eq!(table.page(), 1);
        assert_eq!(table.filtered_len(), 12);
        assert_eq!(table.total_pages(), 2);
        assert_eq!(table.page_rows()[0].id, "2");
    }

    #[test]
    fn test_summary() {
        let mut table = AdminTable::new(rows(25));
        assert_eq!(table.summary("users").unwrap(), "Showing 1 to 10 of 25 users");
        table.last_page();
        assert_eq!(table.summary("users").unwrap(), "Showing 21 to 25 of 25 users");
        assert_eq!(table.page_label(), "Page 3 of 3");

        table.set_search("nobody");
        assert!(table.summary("users").is_none());
        assert_eq!(table.total_pages(), 0);
        assert!(table.page_rows().is_empty());
    }

    #[test]
    fn test_remove_row_steps_back_from_emptied_page() {
        let mut table = AdminTable::new(rows(11));
        table.last_page();
        assert_eq!(table.page(), 2);

        assert_eq!(table.remove_row("11").unwrap().id, "11");
        assert_eq!(table.page(), 1);
        assert_eq!(table.rows().len(), 10);
        assert!(table.remove_row("11").is_none());
    }

    #[test]
    fn test_custom_page_size() {
        let table = AdminTable::new(rows(5)).with_page_size(2);
        assert_eq!(table.total_pages(), 3);
        let table = AdminTable::new(rows(5)).with_page_size(0);
        assert_eq!(table.total_pages(), 5);
    }

    #[test]
    fn test_view_accessors() {
        let mut view = TableView::Ready(AdminTable::new(rows(1)));
        assert!(view.error().is_none());
        assert!(view.table_mut().is_some());

        let view: TableView<Row> = TableView::Failed {
            message: "Failed to load users. Please try again later.".into(),
        };
        assert!(view.table().is_none());
        assert!(view.error().unwrap().starts_with("Failed to load users"));
    }
}
