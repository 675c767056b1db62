//! Mutable search/filter/sort/page selections of one table

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::model::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Orients an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

/// The active sort column and its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: Direction,
}

/// Selections applied to the source rows before rendering.
///
/// Only [`TableView`](super::TableView) mutates this; hosts read it.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub(crate) search_term: String,
    pub(crate) filters: BTreeMap<String, Value>,
    pub(crate) sort: Option<SortState>,
    pub(crate) current_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            filters: BTreeMap::new(),
            sort: None,
            current_page: 1,
        }
    }
}

impl ViewState {
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Active equality filters, keyed by field.
    pub fn filters(&self) -> &BTreeMap<String, Value> {
        &self.filters
    }

    /// The selected value for `field`, if filtered.
    pub fn filter(&self, field: &str) -> Option<&Value> {
        self.filters.get(field)
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Requested page, 1-based. The rendered page may be lower if the rows
    /// shrank since it was set.
    pub fn current_page(&self) -> usize {
        self.current_page
    }
}
