//! Dynamic row record

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use super::Value;
use super::value::local_date;
use super::value::parse_date;
use crate::error::FieldError;

/// An open row: field name to [`Value`].
///
/// Used when the caller has arbitrary JSON objects to show in a table. The
/// typed [`Contract`](super::Contract) model is preferred for API data.
///
/// # Example
///
/// ```
/// use contracts_lib::model::Record;
///
/// let record = Record::new()
///     .set("contract_name", "NDA")
///     .set("risk_score", "High");
///
/// assert_eq!(record.str_field("contract_name").unwrap(), Some("NDA"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // Typed access: an absent or null field reads as `None`, a field holding
    // the wrong kind of value is an error.

    /// Text of a field that has to be there.
    pub fn require_str(&self, field: &str) -> Result<&str, FieldError> {
        self.str_field(field)?
            .ok_or_else(|| FieldError::missing(field))
    }

    pub fn str_field(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(FieldError::type_mismatch(field, "string", other.type_name())),
        }
    }

    /// Calendar date of a field. Text that is not a date reads as `None`, the
    /// same way API listings treat it.
    pub fn date_field(&self, field: &str) -> Result<Option<NaiveDate>, FieldError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(parse_date(s)),
            Some(Value::Date(d)) => Ok(Some(*d)),
            Some(Value::DateTime(dt)) => Ok(Some(local_date(dt))),
            Some(other) => Err(FieldError::type_mismatch(field, "date", other.type_name())),
        }
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
