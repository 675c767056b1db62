//! Problems reading typed fields out of an open record

/// A [`Record`](crate::model::Record) field could not be read as the type a
/// typed model needs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("missing required field '{field}'")]
    Missing { field: String },

    #[error("field '{field}' should be a {expected}, found {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    pub fn missing(field: &str) -> Self {
        Self::Missing {
            field: field.to_string(),
        }
    }

    pub fn type_mismatch(field: &str, expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.to_string(),
            expected,
            actual,
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::TypeMismatch { field, .. } => field,
        }
    }
}
