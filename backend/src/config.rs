//! Database connection settings loaded once at startup via OrthoConfig.
//!
//! Values come from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, and
//! `DB_NAME`. None are mandatory at load time: a missing value only surfaces
//! when a registration tries to connect, where it is reported like any other
//! connection failure.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

/// Program name passed as the sole argument so no CLI flags are parsed.
const PROGRAM_NAME: &str = "student-registration";

/// Every variable the loader reads.
const SETTING_VARIABLES: [&str; 5] = ["DB_HOST", "DB_PORT", "DB_USER", "DB_PASSWORD", "DB_NAME"];

/// Failure to read settings from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load database settings: {message}")]
pub struct SettingsError {
    message: String,
}

/// Connection parameters for the PostgreSQL backend.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DB")]
pub struct DatabaseSettings {
    /// Server host name or address.
    pub host: Option<String>,
    /// Server port; the PostgreSQL default applies when unset.
    pub port: Option<u16>,
    /// Role to authenticate as.
    pub user: Option<String>,
    /// Password for `user`.
    pub password: Option<String>,
    /// Database holding the `students` table.
    pub name: Option<String>,
}

impl DatabaseSettings {
    /// Load settings from the process environment only.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a present variable cannot be
    /// deserialised (for example a non-numeric `DB_PORT`).
    pub fn from_env() -> Result<Self, SettingsError> {
        match Self::load_from_iter([OsString::from(PROGRAM_NAME)]) {
            Ok(settings) => Ok(settings),
            // With no source contributing a key the loader has nothing to
            // deserialise and fails; that is an empty configuration.
            Err(_) if !any_setting_present() => Ok(Self::default()),
            Err(err) => Err(SettingsError {
                message: err.to_string(),
            }),
        }
    }
}

fn any_setting_present() -> bool {
    SETTING_VARIABLES
        .iter()
        .any(|variable| std::env::var_os(variable).is_some())
}
