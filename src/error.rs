//! Plan construction error types.

use crate::schema::FieldId;
use thiserror::Error;

/// Errors that can occur while building or decoding a plan.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Invalid expression tree: {reason}")]
    InvalidExpressionTree { reason: String },

    #[error("Field {0} is not defined in the schema")]
    UndefinedField(FieldId),

    #[error("Vector field {0} cannot be used in a scalar predicate")]
    VectorFieldInPredicate(FieldId),

    #[error("Field {0} is not a vector field")]
    NotAVectorField(FieldId),

    #[error("Expression tree exceeds the maximum depth of {limit}")]
    ExpressionTooDeep { limit: usize },

    #[error("Plan codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlanError {
    pub fn invalid_tree(reason: impl Into<String>) -> Self {
        PlanError::InvalidExpressionTree {
            reason: reason.into(),
        }
    }
}

/// Result type for plan operations.
pub type PlanResult<T> = Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlanError::invalid_tree("mixed literal kinds");
        assert_eq!(
            err.to_string(),
            "Invalid expression tree: mixed literal kinds"
        );

        let err = PlanError::UndefinedField(FieldId(105));
        assert_eq!(err.to_string(), "Field 105 is not defined in the schema");

        let err = PlanError::ExpressionTooDeep { limit: 16 };
        assert_eq!(
            err.to_string(),
            "Expression tree exceeds the maximum depth of 16"
        );
    }
}
