//! Typed contract row

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use super::Record;
use super::TableRow;
use super::Value;
use super::value::parse_date;
use crate::error::FieldError;

/// Lifecycle status of a contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContractStatus {
    Active,
    RenewalDue,
    Expired,
    /// Any label the API sends that is not one of the above.
    Other(String),
}

impl ContractStatus {
    pub fn label(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::RenewalDue => "Renewal Due",
            Self::Expired => "Expired",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for ContractStatus {
    fn from(label: String) -> Self {
        match label.to_lowercase().as_str() {
            "active" => Self::Active,
            "renewal due" => Self::RenewalDue,
            "expired" => Self::Expired,
            _ => Self::Other(label),
        }
    }
}

impl From<ContractStatus> for String {
    fn from(status: ContractStatus) -> Self {
        status.label().to_string()
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk rating assigned to a contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Other(String),
}

impl RiskLevel {
    pub fn label(&self) -> &str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for RiskLevel {
    fn from(label: String) -> Self {
        match label.to_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Other(label),
        }
    }
}

impl From<RiskLevel> for String {
    fn from(risk: RiskLevel) -> Self {
        risk.label().to_string()
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A contract document as listed by `/api/contracts`.
///
/// Known fields are typed; anything else the API sends lands in `extra` and
/// stays searchable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub doc_id: String,
    #[serde(default)]
    pub contract_name: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "parties_text")]
    pub parties: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<ContractStatus>,
    #[serde(default)]
    pub risk_score: Option<RiskLevel>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub uploaded_on: Option<NaiveDate>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Contract {
    /// Creates a contract with only its id set.
    pub fn new(doc_id: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            contract_name: None,
            filename: None,
            parties: None,
            expiry_date: None,
            status: None,
            risk_score: None,
            uploaded_on: None,
            extra: HashMap::new(),
        }
    }

    /// Name shown to users: the contract name, else the file name, else the id.
    pub fn display_name(&self) -> &str {
        self.contract_name
            .as_deref()
            .or(self.filename.as_deref())
            .unwrap_or(&self.doc_id)
    }

    fn known_value(&self, field: &str) -> Option<Value> {
        let value = match field {
            "doc_id" => Value::from(self.doc_id.as_str()),
            "contract_name" => self.contract_name.clone().into(),
            "filename" => self.filename.clone().into(),
            "parties" => self.parties.clone().into(),
            "expiry_date" => self.expiry_date.into(),
            "status" => self.status.as_ref().map(|s| s.label().to_string()).into(),
            "risk_score" => self.risk_score.as_ref().map(|r| r.label().to_string()).into(),
            "uploaded_on" => self.uploaded_on.into(),
            _ => return None,
        };
        Some(value)
    }
}

const KNOWN_FIELDS: [&str; 8] = [
    "doc_id",
    "contract_name",
    "filename",
    "parties",
    "expiry_date",
    "status",
    "risk_score",
    "uploaded_on",
];

impl TableRow for Contract {
    fn value(&self, field: &str) -> Option<Cow<'_, Value>> {
        match self.known_value(field) {
            Some(value) => Some(Cow::Owned(value)),
            None => self.extra.get(field).map(Cow::Borrowed),
        }
    }

    fn values(&self) -> Vec<Cow<'_, Value>> {
        KNOWN_FIELDS
            .iter()
            .filter_map(|field| self.known_value(field))
            .map(Cow::Owned)
            .chain(self.extra.values().map(Cow::Borrowed))
            .collect()
    }

    fn row_key(&self) -> Option<String> {
        Some(self.doc_id.clone())
    }
}

/// Reads an open record with the same leniency as an API listing: labels are
/// normalised, unparseable dates are dropped, and party lists are joined.
/// Only `doc_id` is required.
impl TryFrom<&Record> for Contract {
    type Error = FieldError;

    fn try_from(record: &Record) -> Result<Self, FieldError> {
        let owned = |field: &str| -> Result<Option<String>, FieldError> {
            Ok(record.str_field(field)?.map(str::to_string))
        };

        let mut contract = Contract::new(record.require_str("doc_id")?);
        contract.contract_name = owned("contract_name")?;
        contract.filename = owned("filename")?;
        contract.parties = match record.get("parties") {
            Some(Value::Json(list)) => join_parties(list),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };
        contract.expiry_date = record.date_field("expiry_date")?;
        contract.status = owned("status")?.map(ContractStatus::from);
        contract.risk_score = owned("risk_score")?.map(RiskLevel::from);
        contract.uploaded_on = record.date_field("uploaded_on")?;
        contract.extra = record
            .fields()
            .iter()
            .filter(|(field, _)| !KNOWN_FIELDS.contains(&field.as_str()))
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect();
        Ok(contract)
    }
}

/// Accepts a date string in any shape [`Value::as_date`] understands; anything
/// unparseable becomes `None` instead of failing the whole listing.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// Parties arrive either as one string or as a list of names.
fn parties_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(join_parties))
}

fn join_parties(raw: &serde_json::Value) -> Option<String> {
    match raw {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => Some(
            items
                .iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}
