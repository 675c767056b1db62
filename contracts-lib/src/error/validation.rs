//! Validation error details returned with HTTP 422

use serde::Deserialize;
use serde::Serialize;

/// One field-level complaint from the API.
///
/// `loc` is the path to the offending input, e.g. `["body", "question"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationDetail {
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
}

impl ValidationDetail {
    /// Creates a detail that is not tied to a particular field.
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            loc: Vec::new(),
            msg: msg.into(),
        }
    }

    /// The field name, taken from the second `loc` segment.
    pub fn field(&self) -> Option<String> {
        self.loc.get(1).map(|segment| match segment {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

impl std::fmt::Display for ValidationDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.field() {
            Some(field) => write!(f, "{}: {}", field, self.msg),
            None => f.write_str(&self.msg),
        }
    }
}
