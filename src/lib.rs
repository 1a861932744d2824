//! # authstate
//!
//! The auth state contract: which user is signed in and which method
//! authenticated them.
//!
//! [`AuthState`] is only constructible for a real principal with a declared
//! [`AuthMethod`]. [`Session`] adds the anonymous case. Untyped input enters
//! through [`Validator`] (JSON) or the [`wire`] codec (protobuf), both of
//! which enforce the same invariants as the constructors.
//!
//! Signing users in is out of scope here. A login flow builds an
//! `AuthState` once the provider has vouched for the user; UI code and
//! route guards read it.

pub mod config;
pub mod error;
pub mod method;
pub mod state;
pub mod validate;
pub mod wire;

pub use config::{ConfigError, ContractConfig};
pub use error::ContractError;
pub use method::AuthMethod;
pub use state::{AuthState, Session};
pub use validate::Validator;
pub use wire::CodecError;
