//! Client-side pagination over an already-fetched list.

use serde::Serialize;

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually shown
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// Number of pages needed for `total` items; a zero page size counts as one.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Returns `items[(page-1)*size .. page*size]`, truncated at the end of the
/// list. A page past the end yields an empty slice.
pub fn page_slice<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    let size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

/// Slices `items` into the requested page, clamping the page number to
/// `[1, total_pages]`.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page: usize) -> Page<T> {
    let total_pages = total_pages(items.len(), page_size);
    let number = page.clamp(1, total_pages.max(1));
    Page {
        items: page_slice(items, page_size, number).to_vec(),
        number,
        total_pages,
        total_items: items.len(),
    }
}

/// The current-page state machine: next, previous, reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: usize,
    page_size: usize,
    total_items: usize,
}

impl PageCursor {
    pub fn new(page_size: usize, total_items: usize) -> Self {
        Self { page: 1, page_size: page_size.max(1), total_items }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    /// Advances one page; stays put on the last page.
    pub fn next(&mut self) -> bool {
        if self.page < self.total_pages() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Goes back one page; stays put on page 1.
    pub fn previous(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jumps to `page`, clamped to the valid range.
    pub fn go_to(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }

    /// Back to page 1 for a new list of `total_items`.
    pub fn reset(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.page = 1;
    }
}
