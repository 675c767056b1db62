//! Column descriptors

/// How a column's values are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnKind {
    #[default]
    Plain,
    /// Calendar date, shown as `Jan 05, 2026`.
    Date,
    /// Contract status badge.
    Status,
    /// Risk badge.
    Risk,
    /// Party list, truncated with the full text kept as a tooltip.
    Parties,
}

/// Column configuration.
///
/// Columns define the header label, which row field they read, how the value
/// is formatted, and whether the column takes part in sorting and filtering.
///
/// # Examples
///
/// ```
/// use contracts_lib::view::Column;
///
/// let columns = vec![
///     Column::new("contract_name", "Contract Name"),
///     Column::parties("parties", "Parties"),
///     Column::date("expiry_date", "Expiry Date"),
///     Column::status("status", "Status"),
///     Column::risk("risk_score", "Risk Score"),
/// ];
/// assert!(columns[3].filterable);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Row field this column reads.
    pub key: String,
    /// Header text.
    pub label: String,
    pub kind: ColumnKind,
    /// Defaults to `true`.
    pub sortable: bool,
    /// Whether a filter dropdown is offered. Defaults to `true` for status and
    /// risk columns only.
    pub filterable: bool,
}

impl Column {
    /// Creates a plain text column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: ColumnKind::Plain,
            sortable: true,
            filterable: false,
        }
    }

    pub fn date(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label).kind(ColumnKind::Date)
    }

    pub fn status(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label).kind(ColumnKind::Status)
    }

    pub fn risk(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label).kind(ColumnKind::Risk)
    }

    pub fn parties(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label).kind(ColumnKind::Parties)
    }

    /// Sets the display kind. Status and risk kinds also turn filtering on.
    pub fn kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self.filterable = matches!(kind, ColumnKind::Status | ColumnKind::Risk);
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Text of the "no filter" option in this column's dropdown.
    pub fn filter_label(&self) -> String {
        match self.kind {
            ColumnKind::Status => "All Status".to_string(),
            ColumnKind::Risk => "All Risk".to_string(),
            _ => format!("All {}", self.label),
        }
    }
}
