use std::fmt;

use crate::params::ParameterField;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Structurally invalid input. Identifies exactly one offending field.
    InvalidParameter {
        field: ParameterField,
        reason: String,
    },
}

impl EngineError {
    pub(crate) fn invalid(field: ParameterField, reason: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// The field this error refers to.
    pub fn field(&self) -> ParameterField {
        match self {
            EngineError::InvalidParameter { field, .. } => *field,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidParameter { field, reason } => {
                write!(f, "invalid parameter {field}: {reason}")
            }
        }
    }
}

impl std::error::Error for EngineError {}

pub type Result<T> = std::result::Result<T, EngineError>;
