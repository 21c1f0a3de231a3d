//! One browsing stream: fetched items, their sorted mirror and pagination.

use crate::app::pagination::PaginationState;
use crate::app::sort::{sort_items, SortOption};
use crate::domain::Item;
use std::collections::HashSet;

/// Items of one listing (popular or search) in two orders.
///
/// `raw` holds items in arrival order with duplicate ids dropped; `sorted`
/// holds the same id set ordered by the active [`SortOption`]. New pages are
/// sorted on their own and appended to `sorted`, so earlier rows never move
/// while paging. Every [`Stream::reset`] bumps the generation, which lets the
/// aggregator recognise responses planned before the reset.
#[derive(Debug, Clone)]
pub struct Stream {
    raw: Vec<Item>,
    sorted: Vec<Item>,
    ids: HashSet<u64>,
    pagination: PaginationState,
    generation: u64,
}

impl Stream {
    /// Creates an empty stream at generation 0.
    ///
    /// # Parameters
    ///
    /// * `page_cap` - Highest page number this stream will request
    #[must_use]
    pub fn new(page_cap: u32) -> Self {
        Self {
            raw: Vec::new(),
            sorted: Vec::new(),
            ids: HashSet::new(),
            pagination: PaginationState::new(page_cap),
            generation: 0,
        }
    }

    /// Items in arrival order, without duplicates.
    #[must_use]
    pub fn raw(&self) -> &[Item] {
        &self.raw
    }

    /// Items ordered page by page with the sort option active at arrival,
    /// or fully resorted after [`Stream::resort`].
    #[must_use]
    pub fn sorted(&self) -> &[Item] {
        &self.sorted
    }

    #[must_use]
    pub const fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Mutable pagination, used to narrow the cap from a server total.
    pub fn pagination_mut(&mut self) -> &mut PaginationState {
        &mut self.pagination
    }

    /// Counter bumped on every reset and reload.
    ///
    /// A [`PageRequest`](crate::worker::PageRequest) carrying an older value
    /// is stale.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Items to display: arrival order for the default option, sorted otherwise.
    #[must_use]
    pub fn visible(&self, option: SortOption) -> &[Item] {
        if option.is_default() {
            &self.raw
        } else {
            &self.sorted
        }
    }

    /// Merges one fetched page.
    ///
    /// A reload page replaces the current contents.
    ///
    /// # Parameters
    ///
    /// * `page` - Items in server order
    /// * `option` - Sort option used to order the new rows in `sorted`
    /// * `with_reload` - Whether the page is a fresh page 1
    ///
    /// # Returns
    ///
    /// The number of items whose id was not yet in the stream.
    pub fn append_page(&mut self, page: Vec<Item>, option: SortOption, with_reload: bool) -> usize {
        if with_reload {
            self.clear_items();
        }
        self.pagination.record_page(page.len(), with_reload);

        let fresh: Vec<Item> = page
            .into_iter()
            .filter(|item| self.ids.insert(item.id))
            .collect();
        let added = fresh.len();
        self.sorted.extend(sort_items(&fresh, option));
        self.raw.extend(fresh);
        added
    }

    /// Replaces the contents with a complete, locally produced list.
    pub fn replace(&mut self, items: Vec<Item>, option: SortOption) {
        self.clear_items();
        self.raw = items
            .into_iter()
            .filter(|item| self.ids.insert(item.id))
            .collect();
        self.sorted = sort_items(&self.raw, option);
        self.pagination.complete(self.raw.len());
    }

    /// Rebuilds `sorted` from `raw`.
    pub fn resort(&mut self, option: SortOption) {
        self.sorted = sort_items(&self.raw, option);
    }

    /// Invalidates responses planned against the current generation.
    pub fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Empties the stream and restores pagination with `page_cap`.
    pub fn reset(&mut self, page_cap: u32) {
        self.clear_items();
        self.pagination.reset(page_cap);
        self.bump_generation();
    }

    fn clear_items(&mut self) {
        self.raw.clear();
        self.sorted.clear();
        self.ids.clear();
    }
}
