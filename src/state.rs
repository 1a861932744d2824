//! Authentication state values.
//!
//! DESIGN
//! ======
//! `AuthState` only exists for an authenticated principal. "Nobody is signed
//! in" is `Session::Anonymous`, never an `AuthState` with an empty `user`.
//! Fields are private and every constructor (including `Deserialize`) runs
//! the same checks, so a held `AuthState` is always valid.
//!
//! There is no process-wide current session. Whoever owns the session value
//! drives it through `sign_in` / `sign_out`.

use serde::{Deserialize, Serialize};

use crate::error::ContractError;
use crate::method::AuthMethod;

/// Who is signed in, and how.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawAuthState")]
pub struct AuthState {
    user: String,
    authenticated_by: AuthMethod,
}

impl AuthState {
    /// Build a state for `user` authenticated by `method`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::EmptyUser`] if `user` is empty or whitespace.
    pub fn new(user: impl Into<String>, method: AuthMethod) -> Result<Self, ContractError> {
        let user = user.into();
        if user.trim().is_empty() {
            return Err(ContractError::EmptyUser);
        }
        Ok(Self { user, authenticated_by: method })
    }

    /// Build a state produced by a Google OAuth sign-in.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::EmptyUser`] if `user` is empty or whitespace.
    pub fn google(user: impl Into<String>) -> Result<Self, ContractError> {
        Self::new(user, AuthMethod::GoogleOAuth)
    }

    /// Identifier of the authenticated principal.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn authenticated_by(&self) -> AuthMethod {
        self.authenticated_by
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAuthState {
    user: String,
    authenticated_by: AuthMethod,
}

impl TryFrom<RawAuthState> for AuthState {
    type Error = ContractError;

    fn try_from(raw: RawAuthState) -> Result<Self, Self::Error> {
        Self::new(raw.user, raw.authenticated_by)
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Authentication status of a session. Serialized as `null` when anonymous.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<AuthState>", into = "Option<AuthState>")]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(AuthState),
}

impl Session {
    /// Replace the current status with `state`. Re-authentication overwrites
    /// whatever was held before.
    #[must_use]
    pub fn sign_in(self, state: AuthState) -> Self {
        Self::Authenticated(state)
    }

    #[must_use]
    pub fn sign_out(self) -> Self {
        Self::Anonymous
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn state(&self) -> Option<&AuthState> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(state) => Some(state),
        }
    }

    /// Signed-in user identifier, if any.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.state().map(AuthState::user)
    }
}

impl From<Option<AuthState>> for Session {
    fn from(state: Option<AuthState>) -> Self {
        state.map_or(Self::Anonymous, Self::Authenticated)
    }
}

impl From<Session> for Option<AuthState> {
    fn from(session: Session) -> Self {
        match session {
            Session::Anonymous => None,
            Session::Authenticated(state) => Some(state),
        }
    }
}

impl From<AuthState> for Session {
    fn from(state: AuthState) -> Self {
        Self::Authenticated(state)
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
