//! # Page Window
//!
//! The pager never shows every page number. It shows a bounded window of at most
//! seven entries, with ellipsis markers standing in for the elided ranges:
//!
//! ```text
//! fewer than 8 pages   1 2 3 4 5 6 7
//! near the start       1 2 3 4 5 … 10
//! near the end         1 … 6 7 8 9 10
//! in the middle        1 … 5 6 7 … 10
//! ```
//!
//! The classification is fixed and non-recursive: exactly one of the four
//! branches applies for a given `(page, number_of_pages)`.
//!
//! Ellipsis markers are a variant of their own. Older clients encoded them as the
//! page number `0`, which is only safe because real pages start at 1;
//! [`PageEntry::wire_value`] keeps that encoding available for comparison.

use crate::model::ResultPage;
use std::fmt;

/// Below this many pages the window lists every page.
const FULL_WINDOW_LIMIT: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageEntry {
    Number(u32),
    Ellipsis,
}

impl PageEntry {
    /// Legacy integer encoding: the page number, or `0` for an ellipsis.
    pub fn wire_value(&self) -> u32 {
        match self {
            PageEntry::Number(n) => *n,
            PageEntry::Ellipsis => 0,
        }
    }

    pub fn page(&self) -> Option<u32> {
        match self {
            PageEntry::Number(n) => Some(*n),
            PageEntry::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageEntry::Number(n) => write!(f, "{}", n),
            PageEntry::Ellipsis => f.write_str("…"),
        }
    }
}

/// `ceil(total_count / page_size)`, in integer arithmetic.
///
/// A zero page size yields zero pages rather than dividing by zero.
pub fn number_of_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Computes the pager entries for `page` out of `ceil(total_count / page_size)` pages.
pub fn compute_page_window(page: u32, page_size: u32, total_count: u64) -> Vec<PageEntry> {
    use PageEntry::{Ellipsis, Number};

    let n = number_of_pages(total_count, page_size);

    if n < FULL_WINDOW_LIMIT {
        (1..=n).map(Number).collect()
    } else if page < 5 {
        vec![
            Number(1),
            Number(2),
            Number(3),
            Number(4),
            Number(5),
            Ellipsis,
            Number(n),
        ]
    } else if page >= n - 3 {
        let mut entries = vec![Number(1), Ellipsis];
        entries.extend((n - 4..=n).map(Number));
        entries
    } else {
        vec![
            Number(1),
            Ellipsis,
            Number(page - 1),
            Number(page),
            Number(page + 1),
            Ellipsis,
            Number(n),
        ]
    }
}

/// Everything the pager and the "showing X–Y of Z" line need for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub entries: Vec<PageEntry>,
    pub current_page: u32,
    pub number_of_pages: u32,
    /// 1-based position of the first row on this page.
    pub first_index: u64,
    /// 1-based position of the last row on this page.
    pub last_index: u64,
    pub total_count: u64,
    /// Number of rows actually on this page.
    pub shown: usize,
}

impl PageWindow {
    /// Derives the window for `page` using the established `page_size`.
    ///
    /// The upper bound uses the number of rows received, so a partially filled
    /// final page reports its real extent.
    pub fn for_page(page: &ResultPage, page_size: u32) -> Self {
        let offset = u64::from(page.page.saturating_sub(1)) * u64::from(page_size);
        let shown = page.users.len();

        Self {
            entries: compute_page_window(page.page, page_size, page.count),
            current_page: page.page,
            number_of_pages: number_of_pages(page.count, page_size),
            first_index: offset + 1,
            last_index: offset + shown as u64,
            total_count: page.count,
            shown,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.number_of_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserRow;

    fn wire(entries: &[PageEntry]) -> Vec<u32> {
        entries.iter().map(PageEntry::wire_value).collect()
    }

    fn page_of(page: u32, rows: usize, count: u64, limit: u32) -> ResultPage {
        ResultPage {
            users: (0..rows)
                .map(|i| UserRow::new(i as i64, "User", "user@example.gov"))
                .collect(),
            count,
            page,
            limit,
        }
    }

    #[test]
    fn small_totals_list_every_page_regardless_of_page() {
        for total in 0..=70u64 {
            let n = number_of_pages(total, 10);
            for page in 1..=12 {
                let expected: Vec<u32> = (1..=n).collect();
                assert_eq!(wire(&compute_page_window(page, 10, total)), expected);
            }
        }
    }

    #[test]
    fn start_of_long_list() {
        assert_eq!(
            wire(&compute_page_window(1, 10, 100)),
            vec![1, 2, 3, 4, 5, 0, 10]
        );
        assert_eq!(
            wire(&compute_page_window(4, 10, 100)),
            vec![1, 2, 3, 4, 5, 0, 10]
        );
    }

    #[test]
    fn end_of_long_list() {
        assert_eq!(
            wire(&compute_page_window(9, 10, 100)),
            vec![1, 0, 6, 7, 8, 9, 10]
        );
        assert_eq!(
            wire(&compute_page_window(7, 10, 100)),
            vec![1, 0, 6, 7, 8, 9, 10]
        );
    }

    #[test]
    fn middle_of_long_list() {
        assert_eq!(
            wire(&compute_page_window(6, 10, 100)),
            vec![1, 0, 5, 6, 7, 0, 10]
        );
        assert_eq!(
            wire(&compute_page_window(5, 10, 100)),
            vec![1, 0, 4, 5, 6, 0, 10]
        );
    }

    #[test]
    fn eight_pages_is_the_first_windowed_total() {
        assert_eq!(number_of_pages(71, 10), 8);
        assert_eq!(
            wire(&compute_page_window(1, 10, 71)),
            vec![1, 2, 3, 4, 5, 0, 8]
        );
    }

    #[test]
    fn ceiling_division_on_exact_multiples() {
        assert_eq!(number_of_pages(20, 10), 2);
        assert_eq!(number_of_pages(21, 10), 3);
        assert_eq!(number_of_pages(0, 10), 0);
        assert_eq!(number_of_pages(10, 0), 0);
    }

    #[test]
    fn out_of_range_page_still_classifies() {
        assert_eq!(
            wire(&compute_page_window(40, 10, 100)),
            vec![1, 0, 6, 7, 8, 9, 10]
        );
    }

    #[test]
    fn no_duplicate_neighbours_in_any_window() {
        for total in [80u64, 95, 100, 250, 1000] {
            let n = number_of_pages(total, 10);
            for page in 1..=n {
                let entries = compute_page_window(page, 10, total);
                for pair in entries.windows(2) {
                    assert_ne!(pair[0], pair[1], "page {} of {}: {:?}", page, n, entries);
                }
                let numbers: Vec<u32> = entries.iter().filter_map(PageEntry::page).collect();
                assert!(numbers.windows(2).all(|w| w[0] < w[1]));
                assert!(numbers.iter().all(|p| *p >= 1));
            }
        }
    }

    #[test]
    fn range_covers_partial_final_page() {
        let window = PageWindow::for_page(&page_of(3, 4, 24, 10), 10);
        assert_eq!(window.first_index, 21);
        assert_eq!(window.last_index, 24);
        assert_eq!(window.last_index - window.first_index + 1, 4);
        assert_eq!(window.number_of_pages, 3);
        assert!(window.has_previous());
        assert!(!window.has_next());
    }

    #[test]
    fn range_length_matches_rows_shown() {
        for rows in 0..=10 {
            let window = PageWindow::for_page(&page_of(2, rows, 100, 10), 10);
            assert_eq!(window.last_index + 1 - window.first_index, rows as u64);
            assert_eq!(window.shown, rows);
        }
    }

    #[test]
    fn ellipsis_renders_as_marker() {
        assert_eq!(PageEntry::Ellipsis.to_string(), "…");
        assert_eq!(PageEntry::Number(12).to_string(), "12");
        assert_eq!(PageEntry::Ellipsis.page(), None);
    }
}
