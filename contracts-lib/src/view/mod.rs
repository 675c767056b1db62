//! Client-side tabular view: search, filter, sort, paginate, format
//!
//! The [`TableView`] turns a slice of rows plus its [`ViewState`] into one
//! page of formatted rows. It is synchronous and performs no I/O; the host
//! fetches rows and supplies [`RowActions`] for clicks and deletes.

mod actions;
mod column;
mod engine;
mod format;
mod page;
mod render;
mod state;

pub use actions::{NoActions, RowActions};
pub use column::{Column, ColumnKind};
pub use engine::TableView;
pub use format::{BadgeTone, Cell, PLACEHOLDER, format_cell, truncate};
pub use page::{PageLink, View};
pub use render::{
    Body, EMPTY_HINT, EMPTY_TITLE, FilterControl, HeaderCell, Pager, RenderedRow, Rendered,
    SortIndicator, TableRender,
};
pub use state::{Direction, SortState, ViewState};
