//! The computed view: one page of rows plus pagination information

/// One entry in the pager's button strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page { number: usize, current: bool },
    /// Gap marker between non-adjacent page numbers.
    Ellipsis,
}

/// Result of [`TableView::compute_view`](super::TableView::compute_view).
///
/// Holds references into the caller's rows, in display order, for the current
/// page only, along with the counts needed to draw a pager.
#[derive(Debug, Clone)]
pub struct View<'a, R> {
    pub(crate) rows: Vec<&'a R>,
    pub(crate) total_count: usize,
    pub(crate) total_pages: usize,
    pub(crate) current_page: usize,
    pub(crate) page_size: usize,
    pub(crate) paginated: bool,
}

impl<'a, R> View<'a, R> {
    /// Rows on the current page.
    pub fn rows(&self) -> &[&'a R] {
        &self.rows
    }

    /// Consumes the view and returns the page rows.
    pub fn into_rows(self) -> Vec<&'a R> {
        self.rows
    }

    /// Returns `true` if nothing matched the search and filters.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Number of rows after search and filters, across all pages.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// `ceil(total_count / page_size)`; zero when nothing matched.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// The page actually shown, 1-based.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// 1-based position of the first row on this page, 0 when empty.
    pub fn first_position(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else if self.paginated {
            (self.current_page - 1) * self.page_size + 1
        } else {
            1
        }
    }

    /// 1-based position of the last row on this page, 0 when empty.
    pub fn last_position(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.first_position() + self.rows.len() - 1
        }
    }

    /// `"Showing X to Y of Z results"`.
    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} results",
            self.first_position(),
            self.last_position(),
            self.total_count
        )
    }

    pub fn has_previous(&self) -> bool {
        self.paginated && self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.paginated && self.current_page < self.total_pages
    }

    /// The pager is only worth drawing with more than one page.
    pub fn show_pager(&self) -> bool {
        self.paginated && self.total_pages > 1
    }

    /// Page buttons: first, last, and the current page with one neighbour on
    /// each side. A page two away from the current one becomes an ellipsis.
    pub fn page_window(&self) -> Vec<PageLink> {
        page_window(self.current_page, self.total_pages)
    }
}

pub(crate) fn page_window(current: usize, total: usize) -> Vec<PageLink> {
    (1..=total)
        .filter_map(|page| {
            let near = page + 1 >= current && page <= current + 1;
            if page == 1 || page == total || near {
                Some(PageLink::Page {
                    number: page,
                    current: page == current,
                })
            } else if page + 2 == current || page == current + 2 {
                Some(PageLink::Ellipsis)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(links: &[PageLink]) -> Vec<Option<usize>> {
        links
            .iter()
            .map(|link| match link {
                PageLink::Page { number, .. } => Some(*number),
                PageLink::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn window_in_the_middle() {
        let links = page_window(5, 10);
        assert_eq!(
            numbers(&links),
            vec![Some(1), None, Some(4), Some(5), Some(6), None, Some(10)]
        );
        assert!(links.contains(&PageLink::Page { number: 5, current: true }));
    }

    #[test]
    fn window_at_the_edges() {
        assert_eq!(numbers(&page_window(1, 10)), vec![Some(1), Some(2), None, Some(10)]);
        assert_eq!(numbers(&page_window(10, 10)), vec![Some(1), None, Some(9), Some(10)]);
    }

    #[test]
    fn window_small_totals() {
        assert_eq!(numbers(&page_window(1, 1)), vec![Some(1)]);
        assert_eq!(numbers(&page_window(2, 3)), vec![Some(1), Some(2), Some(3)]);
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn summary_counts_positions() {
        let rows = [1, 2, 3];
        let view = View {
            rows: rows.iter().collect(),
            total_count: 23,
            total_pages: 3,
            current_page: 3,
            page_size: 10,
            paginated: true,
        };
        assert_eq!(view.summary(), "Showing 21 to 23 of 23 results");
        assert!(view.has_previous());
        assert!(!view.has_next());
    }
}
