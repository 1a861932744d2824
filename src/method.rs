//! Supported authentication methods.
//!
//! DESIGN
//! ======
//! `AuthMethod` is a closed set. Every match over it is exhaustive, so a new
//! login mechanism shows up as a compile error at each consumer instead of
//! as an unrecognized string at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContractError;

/// Mechanism that produced an [`AuthState`](crate::AuthState).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthMethod {
    /// Google OAuth sign-in.
    #[serde(rename = "Google OAuth")]
    GoogleOAuth,
}

impl AuthMethod {
    /// Every supported method, in declaration order.
    pub const ALL: [Self; 1] = [Self::GoogleOAuth];

    /// Tag used for this method in JSON documents.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoogleOAuth => "Google OAuth",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMethod {
    type Err = ContractError;

    /// Tags are matched exactly; `"google oauth"` is not a member.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| ContractError::UnknownMethod(s.to_owned()))
    }
}

#[cfg(test)]
#[path = "method_test.rs"]
mod tests;
