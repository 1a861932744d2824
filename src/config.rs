//! Validation limits parsed from environment variables.

/// Longest accepted user identifier when nothing overrides it. Matches the
/// maximum length of an email address.
pub const DEFAULT_MAX_USER_LEN: usize = 254;

pub const MAX_USER_LEN_ENV: &str = "AUTHSTATE_MAX_USER_LEN";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractConfig {
    /// Upper bound on `user` length, counted in characters.
    pub max_user_len: usize,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self { max_user_len: DEFAULT_MAX_USER_LEN }
    }
}

impl ContractConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `AUTHSTATE_MAX_USER_LEN`: positive integer, default 254
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let max_user_len = parse_max_user_len(std::env::var(MAX_USER_LEN_ENV).ok().as_deref())?;
        Ok(Self { max_user_len })
    }
}

/// Parse the user length limit. `None` or a blank value yields the default.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for non-numeric or zero values.
pub fn parse_max_user_len(raw: Option<&str>) -> Result<usize, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_MAX_USER_LEN);
    };
    match raw.parse::<usize>() {
        Ok(0) => Err(ConfigError::Parse(format!("{MAX_USER_LEN_ENV} must be positive"))),
        Ok(n) => Ok(n),
        Err(_) => Err(ConfigError::Parse(format!("invalid {MAX_USER_LEN_ENV}: {raw}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
