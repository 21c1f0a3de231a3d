//! Per-stream pagination tracking.

/// Decides which page a stream fetches next and whether more exist.
///
/// `items_loaded` counts items as the server returned them, before duplicate
/// ids are dropped, so page arithmetic follows the server's pages.
/// `has_reached_end` only flips back on [`PaginationState::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    items_loaded: usize,
    page_cap: u32,
    has_reached_end: bool,
}

impl PaginationState {
    #[must_use]
    pub const fn new(page_cap: u32) -> Self {
        Self {
            items_loaded: 0,
            page_cap,
            has_reached_end: false,
        }
    }

    #[must_use]
    pub const fn items_loaded(&self) -> usize {
        self.items_loaded
    }

    /// Highest page index that may be requested.
    #[must_use]
    pub const fn page_cap(&self) -> u32 {
        self.page_cap
    }

    #[must_use]
    pub const fn has_reached_end(&self) -> bool {
        self.has_reached_end
    }

    /// Page index for the next fetch: `1` on reload, otherwise
    /// `items_loaded / page_size + 1`.
    ///
    /// # Example
    ///
    /// ```
    /// use cinelist::app::PaginationState;
    ///
    /// let mut pagination = PaginationState::new(500);
    /// pagination.record_page(20, false);
    /// pagination.record_page(17, false);
    /// assert_eq!(pagination.next_page(false, 20), 2);
    /// assert_eq!(pagination.next_page(true, 20), 1);
    /// ```
    #[must_use]
    pub fn next_page(&self, with_reload: bool, page_size: usize) -> u32 {
        if with_reload {
            return 1;
        }
        let full_pages = self.items_loaded.checked_div(page_size).unwrap_or(0);
        u32::try_from(full_pages).unwrap_or(u32::MAX).saturating_add(1)
    }

    #[must_use]
    pub const fn is_within_cap(&self, page: u32) -> bool {
        page <= self.page_cap
    }

    /// Accounts for a fetched page of `returned` items. A reload page starts
    /// the count over.
    pub fn record_page(&mut self, returned: usize, with_reload: bool) {
        if with_reload {
            self.items_loaded = 0;
            self.has_reached_end = false;
        }
        self.items_loaded += returned;
        if returned == 0 {
            self.has_reached_end = true;
        }
    }

    /// Lowers the cap to the server-reported page count.
    pub fn narrow_cap(&mut self, total_pages: Option<u32>) {
        if let Some(total) = total_pages {
            self.page_cap = self.page_cap.min(total);
        }
    }

    /// Marks the stream as fully loaded with `items` entries.
    pub fn complete(&mut self, items: usize) {
        self.items_loaded = items;
        self.has_reached_end = true;
    }

    pub fn reset(&mut self, page_cap: u32) {
        *self = Self::new(page_cap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_page_follows_full_pages() {
        let mut pagination = PaginationState::new(500);
        assert_eq!(pagination.next_page(false, 20), 1);

        pagination.record_page(20, false);
        assert_eq!(pagination.next_page(false, 20), 2);

        pagination.record_page(17, false);
        assert_eq!(pagination.items_loaded(), 37);
        assert_eq!(pagination.next_page(false, 20), 2);
        assert_eq!(pagination.next_page(true, 20), 1);
    }

    #[test]
    fn zero_page_size_falls_back_to_first_page() {
        let mut pagination = PaginationState::new(500);
        pagination.record_page(40, false);
        assert_eq!(pagination.next_page(false, 0), 1);
    }

    #[test]
    fn empty_page_marks_the_end() {
        let mut pagination = PaginationState::new(500);
        pagination.record_page(20, false);
        assert!(!pagination.has_reached_end());

        pagination.record_page(0, false);
        assert!(pagination.has_reached_end());

        pagination.reset(500);
        assert!(!pagination.has_reached_end());
        assert_eq!(pagination.items_loaded(), 0);
    }

    #[test]
    fn reload_restarts_the_count() {
        let mut pagination = PaginationState::new(500);
        pagination.record_page(20, false);
        pagination.record_page(20, false);
        pagination.record_page(20, true);
        assert_eq!(pagination.items_loaded(), 20);
    }

    #[test]
    fn cap_only_narrows() {
        let mut pagination = PaginationState::new(500);
        pagination.narrow_cap(Some(5));
        assert_eq!(pagination.page_cap(), 5);
        pagination.narrow_cap(Some(900));
        pagination.narrow_cap(None);
        assert_eq!(pagination.page_cap(), 5);
        assert!(pagination.is_within_cap(5));
        assert!(!pagination.is_within_cap(6));
    }
}
