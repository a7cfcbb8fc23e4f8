// src/table/pagination.rs
use std::num::NonZeroUsize;

/// One page of records. `page_index` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow<'a, T> {
    pub page_index: usize,
    pub page_size: NonZeroUsize,
    pub total_pages: usize,
    pub visible: &'a [T],
}

pub fn total_pages(record_count: usize, page_size: NonZeroUsize) -> usize {
    record_count.div_ceil(page_size.get())
}

/// Slices out page `page_index` of `records`.
///
/// The index is never clamped: asking for page 0 or a page past the end
/// returns an empty slice and leaves correction to the caller.
pub fn paginate<T>(records: &[T], page_size: NonZeroUsize, page_index: usize) -> PageWindow<'_, T> {
    let total = total_pages(records.len(), page_size);

    let visible = if page_index == 0 || page_index > total {
        &records[..0]
    } else {
        let start = (page_index - 1) * page_size.get();
        let end = (start + page_size.get()).min(records.len());
        &records[start..end]
    };

    PageWindow {
        page_index,
        page_size,
        total_pages: total,
        visible,
    }
}

/// Page cursor owned by a view. Keeps `page_index` inside `[1, total_pages]`
/// (or at 1 when there are no pages).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page_index: usize,
    page_size: NonZeroUsize,
    record_count: usize,
}

impl Pager {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_index: 1,
            page_size,
            record_count: 0,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.record_count, self.page_size)
    }

    pub fn set_record_count(&mut self, record_count: usize) {
        self.record_count = record_count;
        self.recover();
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.page_size = page_size;
        self.recover();
    }

    /// Moves forward one page. Returns false on the last page.
    pub fn next(&mut self) -> bool {
        if self.page_index < self.total_pages() {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    /// Moves back one page. Returns false on the first page.
    pub fn previous(&mut self) -> bool {
        if self.page_index > 1 {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }

    pub fn is_first(&self) -> bool {
        self.page_index <= 1
    }

    pub fn is_last(&self) -> bool {
        self.page_index >= self.total_pages()
    }

    pub fn has_multiple_pages(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn window<'a, T>(&self, records: &'a [T]) -> PageWindow<'a, T> {
        paginate(records, self.page_size, self.page_index)
    }

    /// 1-based inclusive range of the records on the current page, for
    /// "Showing X to Y of N" labels. `None` when there is nothing to show.
    pub fn showing_range(&self) -> Option<(usize, usize)> {
        if self.record_count == 0 {
            return None;
        }
        let size = self.page_size.get();
        let start = (self.page_index - 1) * size + 1;
        let end = (self.page_index * size).min(self.record_count);
        Some((start, end))
    }

    fn recover(&mut self) {
        let total = self.total_pages();
        if self.page_index > total {
            self.page_index = total.max(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_twenty_five_records_by_ten() {
        let records: Vec<usize> = (0..25).collect();

        let lens: Vec<usize> = (1..=3)
            .map(|page| paginate(&records, size(10), page).visible.len())
            .collect();
        assert_eq!(lens, vec![10, 10, 5]);
        assert_eq!(paginate(&records, size(10), 3).visible, &[20usize, 21, 22, 23, 24]);

        let mut pager = Pager::new(size(10));
        pager.set_record_count(records.len());
        assert!(pager.next());
        assert!(pager.next());
        assert_eq!(pager.page_index(), 3);
        assert!(!pager.next());
        assert_eq!(pager.page_index(), 3);
        assert_eq!(pager.showing_range(), Some((21, 25)));
    }

    #[test]
    fn test_pages_cover_records_in_order() {
        for n in [0usize, 1, 9, 10, 11, 37, 100] {
            for p in [1usize, 3, 10, 64] {
                let records: Vec<usize> = (0..n).collect();
                let total = total_pages(n, size(p));
                assert_eq!(total, (n + p - 1) / p);

                let joined: Vec<usize> = (1..=total)
                    .flat_map(|page| paginate(&records, size(p), page).visible.to_vec())
                    .collect();
                assert_eq!(joined, records, "n={} p={}", n, p);
            }
        }
    }

    #[test]
    fn test_out_of_range_index_is_empty_not_clamped() {
        let records = vec!['a', 'b', 'c'];
        let window = paginate(&records, size(2), 0);
        assert!(window.visible.is_empty());

        let window = paginate(&records, size(2), 3);
        assert!(window.visible.is_empty());
        assert_eq!(window.page_index, 3);
        assert_eq!(window.total_pages, 2);

        let empty: Vec<char> = Vec::new();
        let window = paginate(&empty, size(2), 1);
        assert_eq!(window.total_pages, 0);
        assert!(window.visible.is_empty());
    }

    #[test]
    fn test_previous_saturates_at_first_page() {
        let mut pager = Pager::new(size(5));
        pager.set_record_count(12);
        assert!(!pager.previous());
        assert_eq!(pager.page_index(), 1);
        assert!(pager.is_first());
    }

    #[test]
    fn test_shrinking_records_resets_to_last_valid_page() {
        let mut pager = Pager::new(size(10));
        pager.set_record_count(45);
        while pager.next() {}
        assert_eq!(pager.page_index(), 5);

        pager.set_record_count(21);
        assert_eq!(pager.page_index(), 3);

        pager.set_record_count(0);
        assert_eq!(pager.page_index(), 1);
        assert_eq!(pager.total_pages(), 0);
        assert_eq!(pager.showing_range(), None);
        assert!(!pager.next());
    }

    #[test]
    fn test_growing_page_size_resets_to_last_valid_page() {
        let mut pager = Pager::new(size(5));
        pager.set_record_count(30);
        for _ in 0..5 {
            pager.next();
        }
        assert_eq!(pager.page_index(), 6);

        pager.set_page_size(size(20));
        assert_eq!(pager.total_pages(), 2);
        assert_eq!(pager.page_index(), 2);
        assert_eq!(pager.window(&(0..30).collect::<Vec<_>>()).visible.len(), 10);
    }
}
