//! Environment-driven settings for the directory adapter.
//!
//! Settings are read through [`mockable::Env`] so tests can substitute a
//! mock environment; values are validated here once instead of at every
//! call site.

use std::time::Duration;

use mockable::Env;
use tracing::warn;
use url::Url;

/// Environment variable naming the Directory Service base URL.
pub const DIRECTORY_URL_ENV: &str = "CREWDESK_DIRECTORY_URL";
/// Environment variable overriding the per-request timeout, in seconds.
pub const DIRECTORY_TIMEOUT_ENV: &str = "CREWDESK_DIRECTORY_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the HTTP directory adapter.
#[derive(Debug, Clone)]
pub struct DirectorySettings {
    /// Base URL every endpoint path is joined onto. Use a trailing slash
    /// (`https://host/api/`) so relative endpoint paths append rather than
    /// replace the final segment.
    pub base_url: Url,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

/// Errors raised while validating settings.
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Build directory settings from environment variables.
///
/// The base URL is required; the timeout falls back to ten seconds with a
/// warning when unset.
///
/// # Examples
///
/// ```rust
/// use crewdesk_controller::config::directory_settings_from_env;
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "CREWDESK_DIRECTORY_URL" => Some("https://directory.crewdesk.example/api/".to_string()),
///     _ => None,
/// });
///
/// let settings = directory_settings_from_env(&env).expect("valid settings");
/// assert_eq!(settings.request_timeout.as_secs(), 10);
/// ```
pub fn directory_settings_from_env<E: Env>(env: &E) -> Result<DirectorySettings, SettingsError> {
    let base_url = base_url_from_env(env)?;
    let request_timeout = timeout_from_env(env)?;
    Ok(DirectorySettings {
        base_url,
        request_timeout,
    })
}

fn base_url_from_env<E: Env>(env: &E) -> Result<Url, SettingsError> {
    let raw = env
        .string(DIRECTORY_URL_ENV)
        .ok_or(SettingsError::MissingEnv {
            name: DIRECTORY_URL_ENV,
        })?;
    Url::parse(&raw).map_err(|_| SettingsError::InvalidEnv {
        name: DIRECTORY_URL_ENV,
        value: raw,
        expected: "an absolute http(s) URL",
    })
}

fn timeout_from_env<E: Env>(env: &E) -> Result<Duration, SettingsError> {
    match env.string(DIRECTORY_TIMEOUT_ENV) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(SettingsError::InvalidEnv {
                name: DIRECTORY_TIMEOUT_ENV,
                value: raw,
                expected: "a positive integer number of seconds",
            }),
        },
        None => {
            warn!("{DIRECTORY_TIMEOUT_ENV} not set; defaulting to {DEFAULT_TIMEOUT_SECS}s");
            Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use mockable::MockEnv;

    fn env_with(url: Option<&str>, timeout: Option<&str>) -> MockEnv {
        let url = url.map(str::to_owned);
        let timeout = timeout.map(str::to_owned);
        let mut env = MockEnv::new();
        env.expect_string().returning(move |name| match name {
            DIRECTORY_URL_ENV => url.clone(),
            DIRECTORY_TIMEOUT_ENV => timeout.clone(),
            _ => None,
        });
        env
    }

    #[test]
    fn missing_base_url_is_an_error() {
        let env = env_with(None, None);
        let err = directory_settings_from_env(&env).expect_err("url is required");
        assert!(matches!(
            err,
            SettingsError::MissingEnv {
                name: DIRECTORY_URL_ENV
            }
        ));
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let env = env_with(Some("not a url"), None);
        let err = directory_settings_from_env(&env).expect_err("url must parse");
        assert!(matches!(err, SettingsError::InvalidEnv { .. }));
    }

    #[test]
    fn explicit_timeout_overrides_the_default() {
        let env = env_with(Some("https://directory.crewdesk.example/api/"), Some("30"));
        let settings = directory_settings_from_env(&env).expect("valid settings");
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let env = env_with(Some("https://directory.crewdesk.example/api/"), Some("0"));
        let err = directory_settings_from_env(&env).expect_err("zero timeout invalid");
        assert!(matches!(err, SettingsError::InvalidEnv { .. }));
    }
}
