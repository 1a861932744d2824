//! Validation of untyped JSON against the auth state contract.
//!
//! Serde alone reports an undeclared method as a generic "unknown variant"
//! message. The validator walks the document by hand so callers get a
//! specific [`ContractError`] and a stable code for each rejection.

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::ContractConfig;
use crate::error::ContractError;
use crate::method::AuthMethod;
use crate::state::{AuthState, Session};

const USER_FIELD: &str = "user";
const METHOD_FIELD: &str = "authenticatedBy";

#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    config: ContractConfig,
}

impl Validator {
    #[must_use]
    pub fn new(config: ContractConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> ContractConfig {
        self.config
    }

    /// Parse and validate a JSON `AuthState` document.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Json`] for malformed JSON, otherwise see
    /// [`Validator::validate_value`].
    pub fn validate_str(&self, input: &str) -> Result<AuthState, ContractError> {
        let value = serde_json::from_str::<Value>(input)
            .map_err(ContractError::from)
            .inspect_err(log_rejection)?;
        self.validate_value(&value)
    }

    /// Validate an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns the first contract violation found, checking shape before
    /// method before user.
    pub fn validate_value(&self, value: &Value) -> Result<AuthState, ContractError> {
        let result = self.check(value);
        match &result {
            Ok(state) => trace!(user = state.user(), method = %state.authenticated_by(), "auth state accepted"),
            Err(e) => log_rejection(e),
        }
        result
    }

    /// Parse and validate a JSON session document, where `null` is anonymous.
    ///
    /// # Errors
    ///
    /// Same as [`Validator::validate_str`].
    pub fn validate_session_str(&self, input: &str) -> Result<Session, ContractError> {
        let value = serde_json::from_str::<Value>(input)
            .map_err(ContractError::from)
            .inspect_err(log_rejection)?;
        self.validate_session_value(&value)
    }

    /// Validate a parsed session value.
    ///
    /// # Errors
    ///
    /// Same as [`Validator::validate_value`] for non-null input.
    pub fn validate_session_value(&self, value: &Value) -> Result<Session, ContractError> {
        if value.is_null() {
            trace!("anonymous session accepted");
            return Ok(Session::Anonymous);
        }
        self.validate_value(value).map(Session::Authenticated)
    }

    /// Apply limits to a state that is already structurally valid.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::UserTooLong`] if the user exceeds the limit.
    pub fn check_limits(&self, state: &AuthState) -> Result<(), ContractError> {
        let len = state.user().chars().count();
        if len > self.config.max_user_len {
            return Err(ContractError::UserTooLong { len, max: self.config.max_user_len });
        }
        Ok(())
    }

    fn check(&self, value: &Value) -> Result<AuthState, ContractError> {
        let object = value.as_object().ok_or(ContractError::NotAnObject)?;
        let user = string_field(object, USER_FIELD)?;
        let method: AuthMethod = string_field(object, METHOD_FIELD)?.parse()?;
        let state = AuthState::new(user, method)?;
        self.check_limits(&state)?;
        Ok(state)
    }
}

fn string_field<'a>(
    object: &'a serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ContractError> {
    match object.get(field) {
        None => Err(ContractError::MissingField(field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ContractError::WrongType { field }),
    }
}

fn log_rejection(err: &ContractError) {
    debug!(code = err.code(), error = %err, "auth state rejected");
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
