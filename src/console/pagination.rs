//! Pagination cursor over a result set.
//!
//! The page count is never stored: it is recomputed from the current row
//! count on every call, so the cursor cannot drift out of sync with a
//! replaced result set.
//!
//! Invariant: `page ∈ [1, page_count]`, or `page == 1` when there are no rows.

use std::ops::Range;

/// 1-based page cursor with a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Pagination {
    /// Cursor on page 1. A page size of 0 is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(total / page_size)`; 0 for an empty result set.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Back to page 1 (after a new result set arrives).
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Move by a signed number of pages.
    ///
    /// Returns `false` and leaves the cursor untouched when the target page
    /// falls outside `[1, page_count]`.
    pub fn step(&mut self, delta: isize, total: usize) -> bool {
        match self.page.checked_add_signed(delta) {
            Some(target) => self.go_to(target, total),
            None => false,
        }
    }

    /// Jump to an absolute page, with the same bounds rule as [`step`](Self::step).
    pub fn go_to(&mut self, target: usize, total: usize) -> bool {
        if target >= 1 && target <= self.page_count(total) {
            self.page = target;
            true
        } else {
            false
        }
    }

    /// Index range of the current page within `total` rows.
    pub fn bounds(&self, total: usize) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    /// Rows on the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.bounds(items.len())]
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_is_ceiling() {
        let p = Pagination::new(10);
        assert_eq!(p.page_count(0), 0);
        assert_eq!(p.page_count(1), 1);
        assert_eq!(p.page_count(10), 1);
        assert_eq!(p.page_count(11), 2);
        assert_eq!(p.page_count(25), 3);
        assert_eq!(p.page_count(100), 10);
    }

    #[test]
    fn test_twenty_five_rows() {
        let rows: Vec<usize> = (1..=25).collect();
        let mut p = Pagination::new(10);

        assert_eq!(p.slice(&rows), &rows[0..10]);
        assert!(p.step(1, rows.len()));
        assert!(p.step(1, rows.len()));
        assert_eq!(p.page(), 3);
        assert_eq!(p.slice(&rows), &[21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_step_out_of_range_is_noop() {
        let mut p = Pagination::new(10);

        assert!(!p.step(-1, 25));
        assert_eq!(p.page(), 1);

        assert!(!p.step(3, 25));
        assert_eq!(p.page(), 1);

        assert!(p.step(2, 25));
        assert!(!p.step(1, 25));
        assert_eq!(p.page(), 3);

        assert!(!p.step(isize::MIN, 25));
        assert_eq!(p.page(), 3);
    }

    #[test]
    fn test_empty_set_never_moves() {
        let mut p = Pagination::new(10);
        assert!(!p.step(1, 0));
        assert!(!p.step(-1, 0));
        assert_eq!(p.page(), 1);
        assert_eq!(p.bounds(0), 0..0);
    }

    #[test]
    fn test_go_to_and_reset() {
        let mut p = Pagination::new(5);
        assert!(p.go_to(4, 20));
        assert_eq!(p.bounds(20), 15..20);
        assert!(!p.go_to(0, 20));
        assert!(!p.go_to(5, 20));

        p.reset();
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn test_bounds_clamped_after_shrink() {
        let mut p = Pagination::new(10);
        assert!(p.go_to(3, 25));
        // Result set replaced by a smaller one without a reset
        assert_eq!(p.bounds(5), 5..5);
    }

    #[test]
    fn test_zero_page_size_clamped() {
        let p = Pagination::new(0);
        assert_eq!(p.page_size(), 1);
        assert_eq!(p.page_count(3), 3);
    }
}
