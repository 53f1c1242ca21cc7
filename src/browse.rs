//! A listing view's state: the fetched list, the user's filters, the
//! filtered view and the current page.

use crate::catalog::Product;
use crate::filters::{self, FilterEvent, FilterState};
use crate::paginate::{paginate, Page, PageCursor};
use crate::sequence::{Sequencer, Ticket};
use tracing::debug;

/// Owns one listing's products and derived views.
///
/// Every change to the filtered list sends the cursor back to page 1.
/// A clone tracks its own loads.
#[derive(Debug)]
pub struct BrowseSession {
    products: Vec<Product>,
    state: FilterState,
    filtered: Vec<Product>,
    cursor: PageCursor,
    loads: Sequencer,
}

impl BrowseSession {
    pub fn new(products: Vec<Product>, page_size: usize) -> Self {
        let cursor = PageCursor::new(page_size, products.len());
        Self {
            filtered: products.clone(),
            products,
            state: FilterState::default(),
            cursor,
            loads: Sequencer::new(),
        }
    }

    /// A session waiting for its first load.
    pub fn empty(page_size: usize) -> Self {
        Self::new(Vec::new(), page_size)
    }

    /// The full fetched list.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Replaces the filter state and recomputes the view.
    pub fn apply_filters(&mut self, state: FilterState) {
        self.state = state;
        let filtered = filters::filter_products(&self.products, &self.state);
        self.set_filtered(filtered);
    }

    /// Applies one edit immediately, search text included.
    pub fn update(&mut self, event: FilterEvent) {
        if event == FilterEvent::Clear {
            self.clear_filters();
            return;
        }
        let mut state = self.state.clone();
        event.apply_to(&mut state);
        self.apply_filters(state);
    }

    /// Accepts a list computed elsewhere, e.g. by a [`FilterComposer`](crate::filters::FilterComposer).
    pub fn set_filtered(&mut self, filtered: Vec<Product>) {
        debug!("Filtered view: {} of {} products", filtered.len(), self.products.len());
        self.cursor.reset(filtered.len());
        self.filtered = filtered;
    }

    /// Resets every filter and shows the full list from page 1.
    pub fn clear_filters(&mut self) {
        self.state.clear();
        self.set_filtered(self.products.clone());
    }

    /// The products on the current page.
    pub fn page(&self) -> Page<Product> {
        paginate(&self.filtered, self.cursor.page_size(), self.cursor.page())
    }

    pub fn page_number(&self) -> usize {
        self.cursor.page()
    }

    pub fn total_pages(&self) -> usize {
        self.cursor.total_pages()
    }

    pub fn next_page(&mut self) -> bool {
        self.cursor.next()
    }

    pub fn previous_page(&mut self) -> bool {
        self.cursor.previous()
    }

    pub fn go_to(&mut self, page: usize) {
        self.cursor.go_to(page);
    }

    /// Brands to offer in the brand picker.
    pub fn available_brands(&self) -> Vec<String> {
        filters::available_brands(&self.products)
    }

    /// Sub-categories to offer, "All" first.
    pub fn sub_categories(&self) -> Vec<String> {
        filters::sub_categories(&self.products)
    }

    /// Issues a ticket for a load that is about to start.
    pub fn begin_load(&self) -> Ticket {
        self.loads.issue()
    }

    /// A handle for checking tickets from another task.
    pub fn sequencer(&self) -> Sequencer {
        self.loads.clone()
    }

    /// Installs a loaded list unless a newer load has been started since.
    ///
    /// The current filters are re-applied to the new list. Returns false
    /// when the response was stale and discarded.
    pub fn finish_load(&mut self, ticket: Ticket, products: Vec<Product>) -> bool {
        if !self.loads.is_current(ticket) {
            debug!("Discarding stale load (ticket {})", ticket.value());
            return false;
        }
        self.products = products;
        let filtered = filters::filter_products(&self.products, &self.state);
        self.set_filtered(filtered);
        true
    }
}

impl Clone for BrowseSession {
    fn clone(&self) -> Self {
        Self {
            products: self.products.clone(),
            state: self.state.clone(),
            filtered: self.filtered.clone(),
            cursor: self.cursor,
            loads: self.loads.detached(),
        }
    }
}
