//! The tabular view engine

use std::borrow::Cow;
use std::marker::PhantomData;

use super::Column;
use super::Direction;
use super::NoActions;
use super::RowActions;
use super::SortState;
use super::View;
use super::ViewState;
use crate::config::TableConfig;
use crate::model::TableRow;
use crate::model::Value;

/// Search, filter, sort and paginate a caller-owned slice of rows.
///
/// The table owns only its [`ViewState`]. Rows are passed into every call and
/// never stored, and [`compute_view`](TableView::compute_view) is a pure
/// function of the rows and the state.
///
/// Search and filter changes send the table back to page 1, so a narrower
/// result never leaves the user on an empty page.
///
/// # Example
///
/// ```
/// use contracts_lib::model::Record;
/// use contracts_lib::view::{Column, TableView};
///
/// let rows = vec![
///     Record::new().set("name", "A").set("risk", "High"),
///     Record::new().set("name", "B").set("risk", "Low"),
///     Record::new().set("name", "C").set("risk", "High"),
/// ];
///
/// let mut table = TableView::new(vec![
///     Column::new("name", "Name"),
///     Column::risk("risk", "Risk"),
/// ]);
/// table.set_filter("risk", "High");
///
/// let view = table.compute_view(&rows);
/// assert_eq!(view.total_count(), 2);
/// ```
pub struct TableView<R, A = NoActions> {
    columns: Vec<Column>,
    config: TableConfig,
    state: ViewState,
    actions: A,
    _rows: PhantomData<fn(&R)>,
}

impl<R: TableRow> TableView<R, NoActions> {
    /// Creates a table with default configuration and no row actions.
    pub fn new(columns: Vec<Column>) -> Self {
        Self::with_actions(columns, NoActions)
    }
}

impl<R: TableRow, A: RowActions<R>> TableView<R, A> {
    /// Creates a table whose row clicks and deletes go to `actions`.
    pub fn with_actions(columns: Vec<Column>, actions: A) -> Self {
        Self {
            columns,
            config: TableConfig::default(),
            state: ViewState::default(),
            actions,
            _rows: PhantomData,
        }
    }

    /// Replaces the configuration (builder pattern).
    pub fn config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn table_config(&self) -> &TableConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut A {
        &mut self.actions
    }

    fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    // =========================================================================
    // State changes
    // =========================================================================

    /// Replaces the search term and returns to page 1.
    ///
    /// Ignored when the table is not searchable.
    pub fn set_search_term(&mut self, text: impl Into<String>) {
        if !self.config.searchable {
            log::debug!("search ignored: table is not searchable");
            return;
        }
        self.state.search_term = text.into();
        self.state.current_page = 1;
    }

    /// Requires `field` to equal `value`, or clears the requirement when
    /// `value` is empty. Returns to page 1.
    ///
    /// Ignored when the table is not filterable.
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        if !self.config.filterable {
            log::debug!("filter ignored: table is not filterable");
            return;
        }
        let field = field.into();
        let value = value.into();
        if is_empty_selection(&value) {
            self.state.filters.remove(&field);
        } else {
            self.state.filters.insert(field, value);
        }
        self.state.current_page = 1;
    }

    /// Removes every filter and returns to page 1.
    pub fn clear_filters(&mut self) {
        self.state.filters.clear();
        self.state.current_page = 1;
    }

    /// Sorts by `field`: ascending when it is a new key, otherwise flips the
    /// direction.
    ///
    /// No-op unless `field` names a sortable column of a sortable table.
    pub fn toggle_sort(&mut self, field: &str) {
        if !self.config.sortable {
            return;
        }
        match self.column(field) {
            Some(column) if column.sortable => {}
            _ => {
                log::debug!("sort ignored: '{field}' is not a sortable column");
                return;
            }
        }

        let direction = match &self.state.sort {
            Some(sort) if sort.key == field && sort.direction == Direction::Asc => Direction::Desc,
            _ => Direction::Asc,
        };
        self.state.sort = Some(SortState {
            key: field.to_string(),
            direction,
        });
    }

    /// Moves to page `n`, clamped into `[1, total_pages]`.
    pub fn set_page(&mut self, rows: &[R], n: usize) {
        let last = self.total_pages(rows).max(1);
        self.state.current_page = n.clamp(1, last);
    }

    /// Moves one page forward, staying on the last page.
    pub fn next_page(&mut self, rows: &[R]) {
        let next = self.state.current_page.saturating_add(1);
        self.set_page(rows, next);
    }

    /// Moves one page back, staying on page 1.
    pub fn previous_page(&mut self) {
        self.state.current_page = self.state.current_page.saturating_sub(1).max(1);
    }

    // =========================================================================
    // Row actions
    // =========================================================================

    /// Hands `row` to the host's view action.
    pub fn open_row(&mut self, row: &R) {
        self.actions.view(row);
    }

    /// Hands `row` to the host's delete action. Returns `false` when the host
    /// offers no delete action.
    pub fn delete_row(&mut self, row: &R) -> bool {
        if !self.actions.supports_delete() {
            return false;
        }
        self.actions.delete(row);
        true
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    /// Number of pages the rows fill after search and filters.
    pub fn total_pages(&self, rows: &[R]) -> usize {
        let count = rows.iter().filter(|row| self.keep(row)).count();
        count.div_ceil(self.config.effective_page_size())
    }

    /// Search, then filter, then stable sort, then slice out the current page.
    pub fn compute_view<'a>(&self, rows: &'a [R]) -> View<'a, R> {
        let matched: Vec<&'a R> = rows.iter().filter(|row| self.keep(row)).collect();
        let sorted = self.sort(matched);

        let page_size = self.config.effective_page_size();
        let total_count = sorted.len();
        let total_pages = total_count.div_ceil(page_size);
        let current_page = self.state.current_page.clamp(1, total_pages.max(1));

        let rows = if self.config.paginated {
            sorted
                .into_iter()
                .skip((current_page - 1) * page_size)
                .take(page_size)
                .collect()
        } else {
            sorted
        };

        View {
            rows,
            total_count,
            total_pages,
            current_page,
            page_size,
            paginated: self.config.paginated,
        }
    }

    /// Distinct non-empty values of `field` across the unfiltered rows, in
    /// first-seen order.
    pub fn filter_options(&self, rows: &[R], field: &str) -> Vec<Value> {
        let mut options: Vec<Value> = Vec::new();
        for row in rows {
            if let Some(value) = row.value(field)
                && !value.is_falsy()
                && !options.iter().any(|seen| seen == &*value)
            {
                options.push(value.into_owned());
            }
        }
        options
    }

    fn keep(&self, row: &R) -> bool {
        self.matches_search(row) && self.matches_filters(row)
    }

    fn matches_search(&self, row: &R) -> bool {
        let term = &self.state.search_term;
        if term.trim().is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        row.values().iter().any(|value| {
            value
                .search_text()
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
    }

    fn matches_filters(&self, row: &R) -> bool {
        self.state.filters.iter().all(|(field, required)| {
            row.value(field)
                .is_some_and(|value| value.matches(required))
        })
    }

    fn sort<'a>(&self, rows: Vec<&'a R>) -> Vec<&'a R> {
        let Some(sort) = &self.state.sort else {
            return rows;
        };

        let mut keyed: Vec<(Cow<'a, Value>, &'a R)> = rows
            .into_iter()
            .map(|row| {
                let key = row.value(&sort.key).unwrap_or(Cow::Owned(Value::Null));
                (key, row)
            })
            .collect();

        // sort_by is stable: equal keys keep source order in both directions.
        keyed.sort_by(|(a, _), (b, _)| sort.direction.apply(a.compare(b)));
        keyed.into_iter().map(|(_, row)| row).collect()
    }
}

fn is_empty_selection(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn rows() -> Vec<Record> {
        (1..=25)
            .map(|i| {
                let parity = if i % 2 == 0 { "even" } else { "odd" };
                Record::new().set("n", i as i64).set("parity", parity)
            })
            .collect()
    }

    fn table() -> TableView<Record> {
        TableView::new(vec![
            Column::new("n", "N"),
            Column::new("parity", "Parity").sortable(false),
        ])
    }

    #[test]
    fn toggle_sort_cycles_direction() {
        let mut table = table();
        table.toggle_sort("n");
        assert_eq!(table.state().sort().unwrap().direction, Direction::Asc);
        table.toggle_sort("n");
        assert_eq!(table.state().sort().unwrap().direction, Direction::Desc);
        table.toggle_sort("n");
        assert_eq!(table.state().sort().unwrap().direction, Direction::Asc);
    }

    #[test]
    fn toggle_sort_ignores_unsortable_and_unknown_columns() {
        let mut table = table();
        table.toggle_sort("parity");
        assert!(table.state().sort().is_none());
        table.toggle_sort("missing");
        assert!(table.state().sort().is_none());

        let mut table = TableView::<Record>::new(vec![Column::new("n", "N")])
            .config(TableConfig::default().with_sortable(false));
        table.toggle_sort("n");
        assert!(table.state().sort().is_none());
    }

    #[test]
    fn switching_sort_key_starts_ascending() {
        let columns = vec![Column::new("a", "A"), Column::new("b", "B")];
        let mut table = TableView::<Record>::new(columns);
        table.toggle_sort("a");
        table.toggle_sort("a");
        table.toggle_sort("b");
        let sort = table.state().sort().unwrap();
        assert_eq!((sort.key.as_str(), sort.direction), ("b", Direction::Asc));
    }

    #[test]
    fn search_and_filter_reset_page() {
        let rows = rows();
        let mut table = table();
        table.set_page(&rows, 3);
        assert_eq!(table.state().current_page(), 3);

        table.set_search_term("1");
        assert_eq!(table.state().current_page(), 1);

        table.set_page(&rows, 2);
        table.set_filter("parity", "odd");
        assert_eq!(table.state().current_page(), 1);
    }

    #[test]
    fn empty_filter_value_clears() {
        let mut table = table();
        table.set_filter("parity", "odd");
        assert_eq!(table.state().filters().len(), 1);
        table.set_filter("parity", "");
        assert!(table.state().filters().is_empty());
    }

    #[test]
    fn navigation_clamps() {
        let rows = rows();
        let mut table = table();
        table.previous_page();
        assert_eq!(table.state().current_page(), 1);
        table.set_page(&rows, 0);
        assert_eq!(table.state().current_page(), 1);
        table.next_page(&rows);
        table.next_page(&rows);
        table.next_page(&rows);
        assert_eq!(table.state().current_page(), 3);
    }

    #[test]
    fn view_clamps_when_rows_shrink() {
        let rows = rows();
        let mut table = table();
        table.set_page(&rows, 3);

        let fewer = &rows[..12];
        let view = table.compute_view(fewer);
        assert_eq!(view.current_page(), 2);
        assert_eq!(view.rows().len(), 2);
    }

    #[test]
    fn unpaginated_view_returns_everything() {
        let rows = rows();
        let table = table().config(TableConfig::default().with_paginated(false));
        let view = table.compute_view(&rows);
        assert_eq!(view.rows().len(), 25);
        assert!(!view.show_pager());
        assert_eq!(view.summary(), "Showing 1 to 25 of 25 results");
    }

    #[test]
    fn disabled_search_and_filters_are_ignored() {
        let mut table = table().config(
            TableConfig::default()
                .with_searchable(false)
                .with_filterable(false),
        );
        table.set_search_term("zzz");
        table.set_filter("parity", "odd");
        assert_eq!(table.state().search_term(), "");
        assert!(table.state().filters().is_empty());
    }

    #[test]
    fn filter_options_skip_empty_values() {
        let rows = vec![
            Record::new().set("status", "Active"),
            Record::new().set("status", ""),
            Record::new(),
            Record::new().set("status", "Expired"),
            Record::new().set("status", "Active"),
        ];
        let table = TableView::<Record>::new(vec![Column::status("status", "Status")]);
        assert_eq!(
            table.filter_options(&rows, "status"),
            vec![Value::from("Active"), Value::from("Expired")]
        );
    }
}
