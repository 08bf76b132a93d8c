use serde::Serialize;

use crate::types::Item;

/// Items shown per page unless configured otherwise.
pub const ITEMS_PER_PAGE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// 1-based, already clamped.
    pub page: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageMeta {
    pub fn label(&self) -> String { format!("Page {} of {}", self.page, self.total_pages) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    pub items: &'a [Item],
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination<'a> {
    /// Nothing to show; the host hides page controls.
    Empty,
    Page(Page<'a>),
}

impl<'a> Pagination<'a> {
    pub fn page(&self) -> Option<&Page<'a>> {
        match self {
            Pagination::Empty => None,
            Pagination::Page(p) => Some(p),
        }
    }
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Slice `items` into the requested page. Out-of-range pages are clamped,
/// never rejected.
pub fn paginate(items: &[Item], page: usize, page_size: usize) -> Pagination<'_> {
    if items.is_empty() {
        return Pagination::Empty;
    }
    let size = page_size.max(1);
    let total = total_pages(items.len(), size);
    let page = page.clamp(1, total);
    let start = (page - 1) * size;
    let end = (start + size).min(items.len());
    Pagination::Page(Page {
        items: &items[start..end],
        meta: PageMeta { page, total_pages: total, has_previous: page > 1, has_next: page < total },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemKind;

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item {
                kind: ItemKind::Technology,
                title: format!("item {i}"),
                year: "N/A".into(),
                description: String::new(),
                link: "#".into(),
                image: "images/placeholder.jpg".into(),
                tags: vec![],
            })
            .collect()
    }

    #[test]
    fn empty_input_has_no_pages() {
        assert_eq!(paginate(&[], 1, ITEMS_PER_PAGE), Pagination::Empty);
        assert_eq!(paginate(&[], 7, ITEMS_PER_PAGE), Pagination::Empty);
    }

    #[test]
    fn pages_partition_the_input() {
        for n in 1..=13 {
            let all = items(n);
            let total = total_pages(n, ITEMS_PER_PAGE);
            let mut seen = Vec::new();
            for p in 1..=total {
                let page = *paginate(&all, p, ITEMS_PER_PAGE).page().unwrap();
                assert_eq!(page.meta.page, p);
                assert!(!page.items.is_empty() && page.items.len() <= ITEMS_PER_PAGE);
                seen.extend(page.items.iter().cloned());
            }
            assert_eq!(seen, all, "n = {n}");
        }
    }

    #[test]
    fn page_beyond_the_end_clamps_to_last() {
        let all = items(9);
        assert_eq!(paginate(&all, 99, ITEMS_PER_PAGE), paginate(&all, 3, ITEMS_PER_PAGE));
        assert_eq!(paginate(&all, 0, ITEMS_PER_PAGE), paginate(&all, 1, ITEMS_PER_PAGE));
    }

    #[test]
    fn five_items_make_two_pages() {
        let all = items(5);
        let first = *paginate(&all, 1, 4).page().unwrap();
        assert_eq!(first.items.len(), 4);
        assert_eq!(first.meta, PageMeta { page: 1, total_pages: 2, has_previous: false, has_next: true });
        let second = *paginate(&all, 2, 4).page().unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.meta.label(), "Page 2 of 2");
        assert!(second.meta.has_previous && !second.meta.has_next);
    }

    #[test]
    fn zero_page_size_acts_as_one() {
        let all = items(3);
        let p = *paginate(&all, 2, 0).page().unwrap();
        assert_eq!(p.items.len(), 1);
        assert_eq!(p.meta.total_pages, 3);
    }
}
