//! Protobuf codec for auth states and sessions.
//!
//! The wire structs are private; callers only see [`AuthState`] and
//! [`Session`]. Decoding runs the same contract checks as the constructors,
//! so bytes cannot smuggle in an empty user or an undeclared method.

use std::fmt::Write;

use prost::Message;

use crate::error::ContractError;
use crate::method::AuthMethod;
use crate::state::{AuthState, Session};

/// Error returned by the decode functions in this module.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The raw bytes could not be decoded as a protobuf message.
    #[error("failed to decode protobuf auth state: {0}")]
    Decode(#[from] prost::DecodeError),
    /// The method integer on the wire is unspecified or not a known [`AuthMethod`].
    #[error("invalid authentication method tag: {0}")]
    InvalidMethod(i32),
    /// The decoded fields violate the contract.
    #[error(transparent)]
    Contract(#[from] ContractError),
    /// Text input was not an even-length string of hex digits.
    #[error("invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

impl AuthMethod {
    fn as_wire(self) -> i32 {
        match self {
            Self::GoogleOAuth => WireAuthMethod::GoogleOauth as i32,
        }
    }

    fn from_wire(value: i32) -> Result<Self, CodecError> {
        match WireAuthMethod::try_from(value) {
            Ok(WireAuthMethod::GoogleOauth) => Ok(Self::GoogleOAuth),
            Ok(WireAuthMethod::Unspecified) | Err(_) => Err(CodecError::InvalidMethod(value)),
        }
    }
}

/// Encode an auth state into protobuf bytes.
#[must_use]
pub fn encode_auth_state(state: &AuthState) -> Vec<u8> {
    state_to_wire(state).encode_to_vec()
}

/// Decode protobuf bytes into an auth state.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed bytes,
/// [`CodecError::InvalidMethod`] for unknown method tags and
/// [`CodecError::Contract`] for an empty user.
pub fn decode_auth_state(bytes: &[u8]) -> Result<AuthState, CodecError> {
    let wire = WireAuthState::decode(bytes)?;
    wire_to_state(wire)
}

/// Encode a session. Anonymous sessions encode to an empty message.
#[must_use]
pub fn encode_session(session: &Session) -> Vec<u8> {
    WireSession { state: session.state().map(state_to_wire) }.encode_to_vec()
}

/// Decode protobuf bytes into a session.
///
/// # Errors
///
/// Same as [`decode_auth_state`] when a state is present.
pub fn decode_session(bytes: &[u8]) -> Result<Session, CodecError> {
    let wire = WireSession::decode(bytes)?;
    match wire.state {
        None => Ok(Session::Anonymous),
        Some(state) => wire_to_state(state).map(Session::Authenticated),
    }
}

fn state_to_wire(state: &AuthState) -> WireAuthState {
    WireAuthState {
        user: state.user().to_owned(),
        authenticated_by: state.authenticated_by().as_wire(),
    }
}

fn wire_to_state(wire: WireAuthState) -> Result<AuthState, CodecError> {
    let method = AuthMethod::from_wire(wire.authenticated_by)?;
    Ok(AuthState::new(wire.user, method)?)
}

// =============================================================================
// HEX
// =============================================================================

/// Lowercase hex rendering of `bytes`.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Parse a hex string (either case) back into bytes.
///
/// # Errors
///
/// Returns [`CodecError::InvalidHex`] for odd lengths or non-hex digits.
pub fn hex_decode(text: &str) -> Result<Vec<u8>, CodecError> {
    Ok(hex::decode(text.trim())?)
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Clone, PartialEq, Message)]
struct WireAuthState {
    #[prost(string, tag = "1")]
    user: String,
    #[prost(enumeration = "WireAuthMethod", tag = "2")]
    authenticated_by: i32,
}

#[derive(Clone, PartialEq, Message)]
struct WireSession {
    #[prost(message, optional, tag = "1")]
    state: Option<WireAuthState>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, prost::Enumeration)]
#[repr(i32)]
enum WireAuthMethod {
    Unspecified = 0,
    GoogleOauth = 1,
}

#[cfg(test)]
#[path = "wire_test.rs"]
mod tests;
