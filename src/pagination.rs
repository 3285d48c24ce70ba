//! Page arithmetic for the patient listing.

/// Rows per listing page.
pub const PAGE_SIZE: usize = 20;

/// A resolved page request: which rows to show and how many pages exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number after clamping.
    pub number: usize,
    /// Row offset of the first row on this page.
    pub offset: usize,
    /// `ceil(total / page_size)`; zero for an empty table.
    pub total_pages: usize,
}

/// Interpret the raw `page` query value: absent or non-numeric means page 1.
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(1)
}

/// Resolve a page request against a table of `total` rows.
///
/// `page < 1` is clamped to 1. Requests past the last page resolve to an
/// offset at or beyond `total`, which slices to zero rows downstream.
pub fn paginate(total: usize, page: usize, page_size: usize) -> Page {
    let number = page.max(1);
    let total_pages = total.div_ceil(page_size);
    let offset = (number - 1).saturating_mul(page_size);

    Page {
        number,
        offset,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forty_five_rows_make_three_pages() {
        let page = paginate(45, 1, PAGE_SIZE);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.offset, 0);

        let last = paginate(45, 3, PAGE_SIZE);
        assert_eq!(last.offset, 40);
    }

    #[test]
    fn exact_multiple_has_no_partial_page() {
        assert_eq!(paginate(40, 1, PAGE_SIZE).total_pages, 2);
        assert_eq!(paginate(60, 1, PAGE_SIZE).total_pages, 3);
    }

    #[test]
    fn page_beyond_total_offsets_past_the_table() {
        let page = paginate(45, 4, PAGE_SIZE);
        assert_eq!(page.total_pages, 3);
        assert!(page.offset >= 45);
    }

    #[test]
    fn page_zero_clamps_to_one() {
        let page = paginate(45, 0, PAGE_SIZE);
        assert_eq!(page.number, 1);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn empty_table_has_zero_pages() {
        let page = paginate(0, 1, PAGE_SIZE);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn single_row_is_one_page() {
        assert_eq!(paginate(1, 1, PAGE_SIZE).total_pages, 1);
    }

    #[test]
    fn parse_page_defaults() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("2")), 2);
        assert_eq!(parse_page(Some(" 3 ")), 3);
        // Negative values fail the unsigned parse and default to 1.
        assert_eq!(parse_page(Some("-1")), 1);
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let page = paginate(45, usize::MAX, PAGE_SIZE);
        assert!(page.offset >= 45);
    }
}
