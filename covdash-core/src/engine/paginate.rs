//! Pages and virtualization windows.
//!
//! Both are borrowed views over an already ordered slice. They only decide
//! how much of the sequence is materialized; they never reorder or drop
//! elements.

use serde::Serialize;

// ============================================================================
// Pages
// ============================================================================

/// One page of an ordered sequence.
///
/// `Copy` regardless of `T`: a page only borrows the sequence.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a, T> {
    /// Items on this page.
    pub items: &'a [T],
    /// Effective 0-based page index after clamping.
    pub page_index: usize,
    /// Effective page size (at least 1).
    pub page_size: usize,
    /// Length of the whole sequence.
    pub total_items: usize,
    /// Number of pages, at least 1 even for an empty sequence.
    pub total_pages: usize,
}

impl<T> Clone for Page<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Page<'_, T> {}

impl<T> Page<'_, T> {
    /// Offset of this page's first item in the whole sequence.
    pub fn start_offset(&self) -> usize {
        self.page_index * self.page_size
    }

    /// Returns true if a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    /// Returns true if a next page exists.
    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.total_pages
    }

    /// 1-based inclusive item range for "Showing 21-23 of 23" labels.
    ///
    /// Returns `None` for an empty page.
    pub fn display_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            None
        } else {
            let first = self.start_offset() + 1;
            Some((first, first + self.items.len() - 1))
        }
    }
}

/// Number of pages for `len` items, treating an empty sequence as one page.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Returns page `page_index` (0-based) of `items`.
///
/// A negative index clamps to the first page and an index past the end
/// clamps to the last page. A page size of 0 is treated as 1.
pub fn paginate<T>(items: &[T], page_size: usize, page_index: i64) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let last = total_pages - 1;
    let page_index = usize::try_from(page_index).map_or(0, |idx| idx.min(last));

    let start = (page_index * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    Page {
        items: &items[start..end],
        page_index,
        page_size,
        total_items: items.len(),
        total_pages,
    }
}

/// Iterates over every page of `items` in order.
///
/// An empty sequence yields a single empty page.
pub fn pages<T>(items: &[T], page_size: usize) -> impl Iterator<Item = Page<'_, T>> {
    let count = total_pages(items.len(), page_size);
    (0..count).map(move |idx| paginate(items, page_size, i64::try_from(idx).unwrap_or(i64::MAX)))
}

// ============================================================================
// Virtualization Windows
// ============================================================================

/// The rows of a scrolling table that need rendering.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Window<'a, T> {
    /// Rows to render, including overscan.
    pub items: &'a [T],
    /// Index of the first rendered row.
    pub start: usize,
    /// One past the index of the last rendered row.
    pub end: usize,
    /// Length of the whole sequence.
    pub total_items: usize,
}

impl<T> Clone for Window<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Window<'_, T> {}

/// Computes the visible window for a viewport scrolled to `offset` rows.
///
/// `overscan` extra rows are rendered on each side. The window is clamped to
/// the sequence, so an offset past the end yields the tail.
pub fn visible_window<T>(items: &[T], offset: usize, viewport: usize, overscan: usize) -> Window<'_, T> {
    let len = items.len();
    let offset = offset.min(len.saturating_sub(viewport.max(1)));
    let start = offset.saturating_sub(overscan);
    let end = offset
        .saturating_add(viewport)
        .saturating_add(overscan)
        .min(len);

    Window {
        items: &items[start..end],
        start,
        end,
        total_items: len,
    }
}
