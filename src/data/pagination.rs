use serde::{Deserialize, Serialize};

/// Page selectors beyond this many collapse to first, last and a window
pub const MAX_PAGE_BUTTONS: usize = 5;

/// Pagination metadata for the current page of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    /// Current page (1-indexed)
    pub current_page: usize,
    pub total_pages: usize,
    pub total_filtered_count: usize,
    /// 1-based inclusive bounds of the page within the filtered set, 0 when empty
    pub range_start: usize,
    pub range_end: usize,
}

impl PaginationInfo {
    pub fn new(current_page: usize, page_size: usize, total_filtered_count: usize) -> Self {
        let (range_start, range_end) = if total_filtered_count == 0 {
            (0, 0)
        } else {
            let offset = page_offset(current_page, page_size);
            (
                offset + 1,
                (offset + page_size).min(total_filtered_count),
            )
        };

        Self {
            current_page,
            total_pages: total_pages(total_filtered_count, page_size),
            total_filtered_count,
            range_start,
            range_end,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.total_filtered_count == 0
    }
}

/// Number of pages needed for `count` rows; never less than 1
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    count.div_ceil(page_size).max(1)
}

/// Offset of the first row of a 1-indexed page
pub fn page_offset(current_page: usize, page_size: usize) -> usize {
    current_page.saturating_sub(1).saturating_mul(page_size)
}

/// Page numbers for a bounded page selector, e.g. `[1, 4, 5, 6, 20]`.
///
/// The caller decides where to draw gaps between non-adjacent numbers.
pub fn page_numbers(current_page: usize, total_pages: usize) -> Vec<usize> {
    if total_pages <= MAX_PAGE_BUTTONS {
        return (1..=total_pages).collect();
    }

    let (start, end) = if current_page <= 3 {
        (2, 4)
    } else if current_page >= total_pages - 2 {
        (total_pages - 3, total_pages - 1)
    } else {
        (current_page - 1, current_page + 1)
    };

    let mut pages = Vec::with_capacity(MAX_PAGE_BUTTONS);
    pages.push(1);
    pages.extend(start..=end);
    pages.push(total_pages);
    pages
}
