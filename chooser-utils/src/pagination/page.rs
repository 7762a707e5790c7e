//! Pure pagination math over zero-based item offsets.

/// Compute the number of pages for a list.
///
/// An empty list still renders one (empty) page.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1)).max(1)
}

/// One-based page number of the page starting at `offset`.
pub fn page_number(offset: usize, per_page: usize) -> usize {
    offset / per_page.max(1) + 1
}

/// Zero-based offset of the first item on a one-based page.
pub fn page_offset(page: usize, per_page: usize) -> usize {
    page.saturating_sub(1).saturating_mul(per_page.max(1))
}

/// Return start/end indices of the window starting at `offset`.
pub fn page_window(total_items: usize, per_page: usize, offset: usize) -> (usize, usize) {
    let start = offset.min(total_items);
    let end = start.saturating_add(per_page.max(1)).min(total_items);
    (start, end)
}

/// Parse a typed one-based page number.
///
/// Returns `Some(page)` when the trimmed text is an integer in `1..=total_pages`.
pub fn parse_one_based_page(raw: &str, total_pages: usize) -> Option<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|page| (1..=total_pages).contains(page))
}
