//! Field access the table view needs from a row

use std::borrow::Cow;

use super::Record;
use super::Value;

/// A row the tabular view can search, filter, sort and format.
///
/// Implemented by the open [`Record`] and by typed models such as
/// [`Contract`](super::Contract).
pub trait TableRow {
    /// Value of one field, or `None` when the row has no such field.
    fn value(&self, field: &str) -> Option<Cow<'_, Value>>;

    /// Every field value of the row. Free-text search scans all of them.
    fn values(&self) -> Vec<Cow<'_, Value>>;

    /// Stable identity for the row, if it has one.
    fn row_key(&self) -> Option<String> {
        None
    }
}

impl TableRow for Record {
    fn value(&self, field: &str) -> Option<Cow<'_, Value>> {
        self.get(field).map(Cow::Borrowed)
    }

    fn values(&self) -> Vec<Cow<'_, Value>> {
        self.fields().values().map(Cow::Borrowed).collect()
    }

    fn row_key(&self) -> Option<String> {
        self.get("doc_id").and_then(Value::search_text)
    }
}
