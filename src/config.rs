use std::{env, fmt, fs, path::Path};

use serde::Deserialize;
use subtle::ConstantTimeEq;

use crate::errors::StartupError;

/// Environment variable holding the admin portal password.
pub const ADMIN_PASSWORD_VAR: &str = "ADMIN_PASSWORD";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP port to listen on.
    pub port: u16,

    /// Log level for tracing (e.g. "info", "debug").
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, StartupError> {
        let file = fs::read_to_string(path).map_err(|source| StartupError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&file).map_err(|source| StartupError::ConfigParse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<AppConfig>(text)
    }
}

/// The admin portal password, loaded once at startup.
#[derive(Clone)]
pub struct AdminSecret(String);

impl AdminSecret {
    /// Wrap a password; empty passwords are rejected.
    pub fn new(password: impl Into<String>) -> Result<Self, StartupError> {
        let password = password.into();
        if password.is_empty() {
            return Err(StartupError::MissingAdminPassword);
        }
        Ok(Self(password))
    }

    /// Read the password from `ADMIN_PASSWORD`.
    pub fn from_env() -> Result<Self, StartupError> {
        let password = env::var(ADMIN_PASSWORD_VAR).unwrap_or_default();
        Self::new(password)
    }

    /// Constant-time comparison against a candidate password.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminSecret(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg = AppConfig::from_json(r#"{ "log_level": "debug" }"#).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn rejects_invalid_config() {
        assert!(AppConfig::from_json(r#"{ "port": "eighty" }"#).is_err());
    }

    #[test]
    fn missing_config_file_is_a_read_error() {
        let err = AppConfig::load_from_file(Path::new("/nonexistent/persondb/config.json"))
            .unwrap_err();
        assert!(matches!(err, StartupError::ConfigRead { .. }));
    }

    #[test]
    fn empty_admin_password_is_rejected() {
        assert!(matches!(
            AdminSecret::new(""),
            Err(StartupError::MissingAdminPassword)
        ));
    }

    #[test]
    fn admin_secret_matches_exactly() {
        let secret = AdminSecret::new("hunter2").unwrap();
        assert!(secret.matches("hunter2"));
        assert!(!secret.matches("hunter"));
        assert!(!secret.matches("hunter22"));
        assert!(!secret.matches(""));
    }

    #[test]
    fn admin_secret_is_redacted_in_debug_output() {
        let secret = AdminSecret::new("hunter2").unwrap();
        assert!(!format!("{secret:?}").contains("hunter2"));
    }
}
