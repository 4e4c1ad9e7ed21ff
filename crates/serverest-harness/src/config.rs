// crates/serverest-harness/src/config.rs
// ============================================================================
// Module: Harness Configuration
// Description: Environment-backed configuration for the conformance harness.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The base URL, optional seed admin credentials, and request timeout are
//! supplied externally through environment variables, never hardcoded in the
//! core logic. Values are parsed with strict UTF-8 enforcement and non-empty
//! validation; invalid input fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use crate::error::HarnessError;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Default base URL of the public reference deployment.
pub const DEFAULT_BASE_URL: &str = "https://serverest.dev";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment keys for harness configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEnv {
    /// Base URL of the API under test.
    BaseUrl,
    /// Seed admin account email.
    AdminEmail,
    /// Seed admin account password.
    AdminPassword,
    /// Per-request timeout in seconds (positive integer).
    TimeoutSeconds,
}

impl HarnessEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "SERVEREST_BASE_URL",
            Self::AdminEmail => "SERVEREST_ADMIN_EMAIL",
            Self::AdminPassword => "SERVEREST_ADMIN_PASSWORD",
            Self::TimeoutSeconds => "SERVEREST_TIMEOUT_SEC",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Pre-existing admin credentials supplied by the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAdmin {
    /// Seed admin email.
    pub email: String,
    /// Seed admin password.
    pub password: String,
}

/// Typed harness configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Base URL of the API under test.
    pub base_url: String,
    /// Optional pre-existing admin account; when absent the fixture factory
    /// mints a fresh admin instead.
    pub seed_admin: Option<SeedAdmin>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HarnessConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Config`] when a value is not valid UTF-8, is
    /// empty, fails validation, or only one half of the seed admin pair is
    /// set.
    pub fn load() -> Result<Self, HarnessError> {
        let base_url = read_env_nonempty(HarnessEnv::BaseUrl.as_str())?
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let email = read_env_nonempty(HarnessEnv::AdminEmail.as_str())?;
        let password = read_env_nonempty(HarnessEnv::AdminPassword.as_str())?;
        let seed_admin = match (email, password) {
            (Some(email), Some(password)) => Some(SeedAdmin {
                email,
                password,
            }),
            (None, None) => None,
            _ => {
                return Err(HarnessError::Config(format!(
                    "{} and {} must be set together",
                    HarnessEnv::AdminEmail.as_str(),
                    HarnessEnv::AdminPassword.as_str()
                )));
            }
        };
        let timeout = read_env_nonempty(HarnessEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(HarnessEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT);
        Ok(Self {
            base_url,
            seed_admin,
            timeout,
        })
    }

    /// Builds a configuration for an explicit base URL, keeping defaults.
    ///
    /// Hermetic suites use this to point the harness at an in-process stub.
    #[must_use]
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            seed_admin: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns [`HarnessError::Config`] when the value contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, HarnessError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string()
            .map(Some)
            .map_err(|_| HarnessError::Config(format!("{name} must be valid UTF-8")))
    })
}

/// Reads an environment variable and rejects empty values.
fn read_env_nonempty(name: &str) -> Result<Option<String>, HarnessError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => {
            Err(HarnessError::Config(format!("{name} must not be empty")))
        }
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive timeout value from an environment variable string.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, HarnessError> {
    let trimmed = raw.trim();
    let secs: u64 = trimmed.parse().map_err(|_| {
        HarnessError::Config(format!("{name} must be a positive integer number of seconds"))
    })?;
    if secs == 0 {
        return Err(HarnessError::Config(format!("{name} must be greater than zero")));
    }
    Ok(Duration::from_secs(secs))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
