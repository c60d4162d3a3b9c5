//! Which page buttons a paginated list shows.
//!
//! Pages are zero-based. Up to five pages are all shown; beyond that the first
//! and last page stay visible around a window of the current page and its
//! neighbours, with ellipses for the gaps.

#[cfg(test)]
#[path = "pagination_test.rs"]
mod pagination_test;

const MAX_VISIBLE: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Items to render, or an empty list when there is nothing to paginate.
pub fn page_window(current: u32, total: u32) -> Vec<PageItem> {
    if total <= 1 {
        return Vec::new();
    }
    if total <= MAX_VISIBLE {
        return (0..total).map(PageItem::Page).collect();
    }

    let mut items = vec![PageItem::Page(0)];
    if current > 2 {
        items.push(PageItem::Ellipsis);
    }
    let start = current.saturating_sub(1).max(1);
    let end = (total - 2).min(current + 1);
    items.extend((start..=end).map(PageItem::Page));
    if current < total - 3 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total - 1));
    items
}

pub fn has_previous(current: u32) -> bool {
    current > 0
}

pub fn has_next(current: u32, total: u32) -> bool {
    current + 1 < total
}
