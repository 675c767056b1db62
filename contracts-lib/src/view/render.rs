//! Render model: everything a host needs to draw the table

use super::Cell;
use super::Column;
use super::Direction;
use super::PageLink;
use super::RowActions;
use super::TableView;
use super::format_cell;
use crate::model::TableRow;
use crate::model::Value;

/// Title of the empty state.
pub const EMPTY_TITLE: &str = "No contracts found";
/// Hint under the empty-state title.
pub const EMPTY_HINT: &str = "Try adjusting your search or filters";

/// Sort indicator drawn next to a sortable header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    /// `None` for columns that cannot be sorted.
    pub indicator: Option<SortIndicator>,
}

/// One filter dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterControl {
    pub field: String,
    /// Label of the "no filter" entry, e.g. `All Status`.
    pub all_label: String,
    pub options: Vec<Value>,
    pub selected: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct RenderedRow<'a, R> {
    pub row: &'a R,
    pub key: Option<String>,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone)]
pub enum Body<'a, R> {
    /// Nothing matched; show the title and hint instead of rows.
    Empty { title: &'static str, hint: &'static str },
    Rows(Vec<RenderedRow<'a, R>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pager {
    pub summary: String,
    pub links: Vec<PageLink>,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone)]
pub struct TableRender<'a, R> {
    pub header: Vec<HeaderCell>,
    /// Current search text, `None` when the table has no search box.
    pub search: Option<String>,
    pub filters: Vec<FilterControl>,
    pub body: Body<'a, R>,
    /// `None` when pagination is off or everything fits on one page.
    pub pager: Option<Pager>,
    /// Whether rows carry a delete action.
    pub can_delete: bool,
}

/// What the host should draw.
#[derive(Debug, Clone)]
pub enum Rendered<'a, R> {
    /// The caller is still fetching rows.
    Loading,
    Table(TableRender<'a, R>),
}

impl<R: TableRow, A: RowActions<R>> TableView<R, A> {
    /// Sort indicator for the column `key`, `None` if it cannot be sorted.
    pub fn sort_indicator(&self, key: &str) -> Option<SortIndicator> {
        let column = self.columns().iter().find(|c| c.key == key)?;
        if !self.table_config().sortable || !column.sortable {
            return None;
        }
        Some(match self.state().sort() {
            Some(sort) if sort.key == key => match sort.direction {
                Direction::Asc => SortIndicator::Ascending,
                Direction::Desc => SortIndicator::Descending,
            },
            _ => SortIndicator::Unsorted,
        })
    }

    /// Formats the current page for display. `loading` is the caller's fetch
    /// flag; while set, no rows are processed.
    pub fn render<'a>(&self, rows: &'a [R], loading: bool) -> Rendered<'a, R> {
        if loading {
            return Rendered::Loading;
        }

        let config = self.table_config();
        let view = self.compute_view(rows);

        let header = self
            .columns()
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                label: column.label.clone(),
                indicator: self.sort_indicator(&column.key),
            })
            .collect();

        let filters = if config.filterable {
            self.columns()
                .iter()
                .filter(|column| column.filterable)
                .map(|column| FilterControl {
                    field: column.key.clone(),
                    all_label: column.filter_label(),
                    options: self.filter_options(rows, &column.key),
                    selected: self.state().filter(&column.key).cloned(),
                })
                .collect()
        } else {
            Vec::new()
        };

        let pager = view.show_pager().then(|| Pager {
            summary: view.summary(),
            links: view.page_window(),
            has_previous: view.has_previous(),
            has_next: view.has_next(),
        });

        let body = if view.rows().is_empty() {
            Body::Empty {
                title: EMPTY_TITLE,
                hint: EMPTY_HINT,
            }
        } else {
            Body::Rows(
                view.rows()
                    .iter()
                    .map(|row| RenderedRow {
                        row: *row,
                        key: row.row_key(),
                        cells: self.cells(row),
                    })
                    .collect(),
            )
        };

        Rendered::Table(TableRender {
            header,
            search: config.searchable.then(|| self.state().search_term().to_string()),
            filters,
            body,
            pager,
            can_delete: self.actions().supports_delete(),
        })
    }

    /// Formatted cells of one row, in column order.
    pub fn cells(&self, row: &R) -> Vec<Cell> {
        let width = self.table_config().parties_width;
        self.columns()
            .iter()
            .map(|column: &Column| {
                let value = row.value(&column.key);
                format_cell(value.as_deref(), column.kind, width)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::model::Record;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("contract_name", "Contract Name"),
            Column::status("status", "Status"),
            Column::risk("risk_score", "Risk Score").sortable(false),
        ]
    }

    fn rows() -> Vec<Record> {
        (0..12)
            .map(|i| {
                Record::new()
                    .set("contract_name", format!("Contract {i:02}"))
                    .set("status", if i % 3 == 0 { "Expired" } else { "Active" })
                    .set("risk_score", "Low")
            })
            .collect()
    }

    fn unwrap_table<'a>(rendered: Rendered<'a, Record>) -> TableRender<'a, Record> {
        match rendered {
            Rendered::Table(table) => table,
            Rendered::Loading => panic!("expected a table"),
        }
    }

    #[test]
    fn loading_short_circuits() {
        let table = TableView::<Record>::new(columns());
        assert!(matches!(table.render(&rows(), true), Rendered::Loading));
    }

    #[test]
    fn header_reflects_sort_state() {
        let mut table = TableView::<Record>::new(columns());
        table.toggle_sort("contract_name");
        table.toggle_sort("contract_name");

        let row_data = rows();
        let render = unwrap_table(table.render(&row_data, false));
        let indicators: Vec<_> = render.header.iter().map(|h| h.indicator).collect();
        assert_eq!(
            indicators,
            vec![Some(SortIndicator::Descending), Some(SortIndicator::Unsorted), None]
        );
    }

    #[test]
    fn filters_offer_unfiltered_options() {
        let mut table = TableView::<Record>::new(columns());
        table.set_filter("status", "Expired");

        let row_data = rows();
        let render = unwrap_table(table.render(&row_data, false));
        let status = &render.filters[0];
        assert_eq!(status.all_label, "All Status");
        assert_eq!(status.options, vec![Value::from("Expired"), Value::from("Active")]);
        assert_eq!(status.selected, Some(Value::from("Expired")));
        assert_eq!(render.filters[1].all_label, "All Risk");
    }

    #[test]
    fn pager_only_with_multiple_pages() {
        let table = TableView::<Record>::new(columns());
        let row_data = rows();
        let render = unwrap_table(table.render(&row_data, false));
        let pager = render.pager.expect("12 rows over 10 per page");
        assert_eq!(pager.summary, "Showing 1 to 10 of 12 results");
        assert!(pager.has_next);

        let table = TableView::<Record>::new(columns())
            .config(TableConfig::default().with_page_size(20));
        let row_data = rows();
        let render = unwrap_table(table.render(&row_data, false));
        assert!(render.pager.is_none());
    }

    #[test]
    fn empty_state_when_nothing_matches() {
        let mut table = TableView::<Record>::new(columns());
        table.set_search_term("no such contract");
        let row_data = rows();
        let render = unwrap_table(table.render(&row_data, false));
        assert!(matches!(
            render.body,
            Body::Empty { title: EMPTY_TITLE, .. }
        ));
        assert!(render.pager.is_none());
        assert!(!render.can_delete);
    }

    #[test]
    fn cells_follow_column_order() {
        let table = TableView::<Record>::new(columns());
        let row = Record::new().set("contract_name", "Lease").set("status", "Active");
        let cells = table.cells(&row);
        assert_eq!(cells[0], Cell::Text("Lease".into()));
        assert_eq!(cells[1].to_string(), "Active");
        assert_eq!(cells[2], Cell::Placeholder);
    }
}
