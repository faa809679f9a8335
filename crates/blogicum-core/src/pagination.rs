//! Fixed-size pagination over ordered result sets.

use std::num::IntErrorKind;

use serde::Serialize;

/// Page size of every post listing.
pub const POSTS_PER_PAGE: usize = 10;

/// One page of an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served.
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            total_pages: self.total_pages,
            total_items: self.total_items,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

/// Splits sequences into pages of `per_page` items.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    per_page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(POSTS_PER_PAGE)
    }
}

impl Paginator {
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    /// An empty sequence still has one (empty) page.
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.per_page).max(1)
    }

    /// Return page `requested`, clamped into `1..=total_pages`.
    pub fn paginate<T>(&self, items: Vec<T>, requested: i64) -> Page<T> {
        let total_items = items.len();
        let total_pages = self.total_pages(total_items);
        let number = requested.clamp(1, total_pages as i64) as usize;

        let start = (number - 1) * self.per_page;
        let items: Vec<T> = items.into_iter().skip(start).take(self.per_page).collect();

        Page {
            items,
            number,
            total_pages,
            total_items,
            has_next: number < total_pages,
            has_previous: number > 1,
        }
    }
}

/// Parse a `?page=` value; anything missing or non-numeric means page 1.
/// Numbers too large for `i64` saturate, so they still clamp to the last page.
pub fn parse_page_number(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else { return 1 };
    match raw.trim().parse::<i64>() {
        Ok(number) => number,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_of_twenty_five() {
        let page = Paginator::default().paginate((1..=25).collect(), 1);

        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0], 1);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn test_last_page_of_twenty_five() {
        let page = Paginator::default().paginate((1..=25).collect::<Vec<_>>(), 3);

        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn test_out_of_range_pages_clamp() {
        let paginator = Paginator::default();

        let high = paginator.paginate((1..=25).collect::<Vec<_>>(), 99);
        assert_eq!(high.number, 3);
        assert_eq!(high.items.len(), 5);

        let low = paginator.paginate((1..=25).collect::<Vec<_>>(), -4);
        assert_eq!(low.number, 1);
        assert_eq!(low.items.len(), 10);
    }

    #[test]
    fn test_empty_sequence_has_single_page() {
        let page = Paginator::default().paginate(Vec::<u8>::new(), 2);

        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn test_parse_page_number() {
        assert_eq!(parse_page_number(None), 1);
        assert_eq!(parse_page_number(Some("3")), 3);
        assert_eq!(parse_page_number(Some("abc")), 1);
        assert_eq!(parse_page_number(Some("-2")), -2);
    }

    #[test]
    fn test_overflowing_page_number_serves_last_page() {
        let requested = parse_page_number(Some("99999999999999999999"));
        assert_eq!(requested, i64::MAX);

        let page = Paginator::default().paginate((1..=25).collect::<Vec<_>>(), requested);
        assert_eq!(page.number, 3);

        assert_eq!(parse_page_number(Some("-99999999999999999999")), i64::MIN);
    }
}
