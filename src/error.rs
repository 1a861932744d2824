//! Contract violations.

/// Reason a value failed to satisfy the auth state contract.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// The input was not syntactically valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The document was valid JSON but not an object.
    #[error("auth state must be a JSON object")]
    NotAnObject,
    /// A required field was absent.
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    /// A field was present with a non-string value.
    #[error("field `{field}` must be a string")]
    WrongType { field: &'static str },
    /// The `authenticatedBy` tag is not a declared method.
    #[error("unknown authentication method: {0:?}")]
    UnknownMethod(String),
    /// The user identifier was empty or whitespace.
    #[error("user identifier must not be empty")]
    EmptyUser,
    /// The user identifier exceeded the configured limit.
    #[error("user identifier is {len} characters, limit is {max}")]
    UserTooLong { len: usize, max: usize },
}

impl ContractError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Json(_) => "E_INVALID_JSON",
            Self::NotAnObject => "E_NOT_AN_OBJECT",
            Self::MissingField(_) => "E_MISSING_FIELD",
            Self::WrongType { .. } => "E_WRONG_TYPE",
            Self::UnknownMethod(_) => "E_UNKNOWN_METHOD",
            Self::EmptyUser => "E_EMPTY_USER",
            Self::UserTooLong { .. } => "E_USER_TOO_LONG",
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
