//! Cell formatting per column kind
//!
//! Formatting never fails: absent, empty or unparseable values degrade to a
//! placeholder or to their raw text.

use std::fmt;

use super::ColumnKind;
use crate::model::Value;

/// Shown for empty cells.
pub const PLACEHOLDER: &str = "-";

/// Classification of a status or risk badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Active,
    RenewalDue,
    Expired,
    Low,
    Medium,
    High,
    Neutral,
}

impl BadgeTone {
    /// Case-insensitive status classification.
    pub fn for_status(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "active" => Self::Active,
            "renewal due" => Self::RenewalDue,
            "expired" => Self::Expired,
            _ => Self::Neutral,
        }
    }

    /// Case-insensitive risk classification.
    pub fn for_risk(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Neutral,
        }
    }

    /// Stylesheet class for HTML hosts.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Active => "status-active",
            Self::RenewalDue => "status-renewal-due",
            Self::Expired => "status-expired",
            Self::Low => "risk-low",
            Self::Medium => "risk-medium",
            Self::High => "risk-high",
            Self::Neutral => "badge-neutral",
        }
    }
}

/// A formatted table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Placeholder,
    Text(String),
    /// Already formatted as `MMM dd, yyyy`.
    Date(String),
    Badge { label: String, tone: BadgeTone },
    /// Display text, possibly shortened, plus the full text for a tooltip.
    Truncated { text: String, full: String },
}

impl Cell {
    /// Full, untruncated text of the cell.
    pub fn full_text(&self) -> &str {
        match self {
            Cell::Placeholder => PLACEHOLDER,
            Cell::Text(text) | Cell::Date(text) => text,
            Cell::Badge { label, .. } => label,
            Cell::Truncated { full, .. } => full,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Truncated { text, .. } => f.write_str(text),
            other => f.write_str(other.full_text()),
        }
    }
}

/// Formats one value for a column of the given kind.
///
/// `parties_width` is the character budget for [`ColumnKind::Parties`] cells.
pub fn format_cell(value: Option<&Value>, kind: ColumnKind, parties_width: usize) -> Cell {
    let value = match value {
        Some(v) if !v.is_falsy() => v,
        _ => return Cell::Placeholder,
    };

    match kind {
        ColumnKind::Date => match value.as_date() {
            Some(date) => Cell::Date(date.format("%b %d, %Y").to_string()),
            None => Cell::Text(value.to_string()),
        },
        ColumnKind::Status => {
            let label = value.to_string();
            let tone = BadgeTone::for_status(&label);
            Cell::Badge { label, tone }
        }
        ColumnKind::Risk => {
            let label = value.to_string();
            let tone = BadgeTone::for_risk(&label);
            Cell::Badge { label, tone }
        }
        ColumnKind::Parties => {
            let full = value.to_string();
            Cell::Truncated {
                text: truncate(&full, parties_width),
                full,
            }
        }
        ColumnKind::Plain => Cell::Text(value.to_string()),
    }
}

/// Shortens `text` to at most `width` characters, ending in `…` when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if width == 0 || text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn empty_values_become_placeholder() {
        for kind in [ColumnKind::Plain, ColumnKind::Date, ColumnKind::Status] {
            assert_eq!(format_cell(None, kind, 40), Cell::Placeholder);
            assert_eq!(format_cell(Some(&Value::Null), kind, 40), Cell::Placeholder);
            assert_eq!(format_cell(Some(&Value::from("")), kind, 40), Cell::Placeholder);
        }
        assert_eq!(Cell::Placeholder.to_string(), "-");
    }

    #[test]
    fn dates_render_as_calendar_dates() {
        let date = Value::from(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert_eq!(
            format_cell(Some(&date), ColumnKind::Date, 40),
            Cell::Date("Jan 05, 2026".into())
        );
        let naive = Value::from("2025-12-31T23:00:00");
        assert_eq!(format_cell(Some(&naive), ColumnKind::Date, 40).to_string(), "Dec 31, 2025");
    }

    #[test]
    fn timestamps_use_the_local_calendar() {
        let instant = chrono::DateTime::parse_from_rfc3339("2025-12-31T23:00:00Z").unwrap();
        let expected = instant
            .with_timezone(&chrono::Local)
            .format("%b %d, %Y")
            .to_string();

        let text = Value::from("2025-12-31T23:00:00Z");
        assert_eq!(format_cell(Some(&text), ColumnKind::Date, 40).to_string(), expected);
        let typed = Value::from(instant.with_timezone(&chrono::Utc));
        assert_eq!(format_cell(Some(&typed), ColumnKind::Date, 40).to_string(), expected);
    }

    #[test]
    fn unparseable_dates_fall_back_to_text() {
        let value = Value::from("TBD");
        assert_eq!(format_cell(Some(&value), ColumnKind::Date, 40), Cell::Text("TBD".into()));
    }

    #[test]
    fn badges_classify_case_insensitively() {
        let cell = format_cell(Some(&Value::from("RENEWAL DUE")), ColumnKind::Status, 40);
        assert_eq!(
            cell,
            Cell::Badge { label: "RENEWAL DUE".into(), tone: BadgeTone::RenewalDue }
        );
        let cell = format_cell(Some(&Value::from("Critical")), ColumnKind::Risk, 40);
        assert!(matches!(cell, Cell::Badge { tone: BadgeTone::Neutral, .. }));
        assert_eq!(BadgeTone::High.css_class(), "risk-high");
    }

    #[test]
    fn parties_are_truncated_with_tooltip() {
        let value = Value::from("Acme Corporation and Globex Industries");
        let cell = format_cell(Some(&value), ColumnKind::Parties, 10);
        assert_eq!(cell.to_string(), "Acme Corp…");
        assert_eq!(cell.full_text(), "Acme Corporation and Globex Industries");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("Société Générale", 8), "Société…");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("anything", 0), "anything");
    }
}
