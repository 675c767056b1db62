//! Row actions for the terminal host

use contracts_lib::model::TableRow;
use contracts_lib::view::RowActions;
use serde::Serialize;

/// A row the user asked to open. `row` is `Null` when the row could not be
/// turned into JSON; the key still identifies it.
#[derive(Debug, Clone, PartialEq)]
pub struct Opened {
    pub key: Option<String>,
    pub row: serde_json::Value,
}

/// Queues view and delete requests from the table; the command carries them
/// out afterwards since API calls are async.
#[derive(Debug, Default)]
pub struct CliActions {
    allow_delete: bool,
    pub opened: Vec<Opened>,
    pub deletions: Vec<String>,
}

impl CliActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delete() -> Self {
        Self {
            allow_delete: true,
            ..Self::default()
        }
    }
}

impl<R: TableRow + Serialize> RowActions<R> for CliActions {
    fn view(&mut self, row: &R) {
        let key = row.row_key();
        let json = serde_json::to_value(row).unwrap_or_else(|err| {
            log::warn!("row {key:?} could not be shown as JSON: {err}");
            serde_json::Value::Null
        });
        self.opened.push(Opened { key, row: json });
    }

    fn delete(&mut self, row: &R) {
        match row.row_key() {
            Some(key) => self.deletions.push(key),
            None => log::warn!("row without an id cannot be deleted"),
        }
    }

    fn supports_delete(&self) -> bool {
        self.allow_delete
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use contracts_lib::model::Value;
    use contracts_lib::model::Contract;
    use contracts_lib::model::Record;
    use contracts_lib::view::Column;
    use contracts_lib::view::TableView;

    #[test]
    fn open_records_key_and_row() {
        let rows = vec![Record::new().set("doc_id", "d1").set("name", "NDA")];
        let columns = vec![Column::new("name", "Name")];
        let mut table = TableView::with_actions(columns, CliActions::new());
        table.open_row(&rows[0]);
        let opened = &table.actions().opened[0];
        assert_eq!(opened.key.as_deref(), Some("d1"));
        assert_eq!(opened.row["name"], "NDA");
    }

    struct Unprintable;

    impl TableRow for Unprintable {
        fn value(&self, _field: &str) -> Option<Cow<'_, Value>> {
            None
        }

        fn values(&self) -> Vec<Cow<'_, Value>> {
            Vec::new()
        }

        fn row_key(&self) -> Option<String> {
            Some("u1".to_string())
        }
    }

    impl Serialize for Unprintable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not representable"))
        }
    }

    #[test]
    fn unserializable_rows_keep_their_key() {
        let mut table = TableView::with_actions(vec![], CliActions::new());
        table.open_row(&Unprintable);
        assert_eq!(
            table.actions().opened,
            vec![Opened {
                key: Some("u1".to_string()),
                row: serde_json::Value::Null,
            }]
        );
    }

    #[test]
    fn delete_requires_permission() {
        let contract = Contract::new("d9");
        let mut table = TableView::with_actions(vec![], CliActions::new());
        assert!(!table.delete_row(&contract));

        let mut table = TableView::with_actions(vec![], CliActions::with_delete());
        assert!(table.delete_row(&contract));
        assert_eq!(table.actions().deletions, vec!["d9".to_string()]);
    }
}
