//! Row actions the host application provides

/// Capabilities a table invokes when the user acts on a row.
///
/// The table itself performs no I/O; opening a contract or deleting it is the
/// host's business.
pub trait RowActions<R> {
    /// The row was clicked or its "view details" action chosen.
    fn view(&mut self, row: &R);

    /// The row's delete action was chosen. Only called when
    /// [`supports_delete`](RowActions::supports_delete) returns `true`.
    fn delete(&mut self, row: &R) {
        let _ = row;
    }

    /// Whether rows get a delete action.
    fn supports_delete(&self) -> bool {
        false
    }
}

/// Row actions for a read-only table that ignores clicks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActions;

impl<R> RowActions<R> for NoActions {
    fn view(&mut self, _row: &R) {}
}
