//! Application configuration loaded from environment variables.
//!
//! - `BFX_API_KEY` / `BFX_API_SECRET`: credentials for the authenticated endpoints
//! - `BFX_API_URL`: overrides the default REST base URL
//! - `BFX_CA_BUNDLE`: path to a PEM file replacing the default trust roots

use std::path::PathBuf;

/// Default authenticated REST endpoint.
const DEFAULT_API_URL: &str = "https://api.bitfinex.com/v2/";

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub bitfinex: BitfinexConfig,
}

/// Bitfinex-specific configuration values.
#[derive(Debug)]
pub struct BitfinexConfig {
    /// Base URL, always ending in `/`.
    pub api_url: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub ca_bundle: Option<PathBuf>,
}

/// Loads the application configuration from environment variables.
///
/// The API URL defaults to `https://api.bitfinex.com/v2/`. API credentials
/// are optional, but when one is set both must be present.
///
/// # Errors
///
/// Returns [`BfxError::Config`](crate::BfxError::Config) if only one of
/// the two credential variables is set.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let mut api_url = non_empty_var("BFX_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
    if !api_url.ends_with('/') {
        api_url.push('/');
    }

    let api_key = non_empty_var("BFX_API_KEY");
    let api_secret = non_empty_var("BFX_API_SECRET");

    match (&api_key, &api_secret) {
        (Some(_), None) => {
            return Err(crate::BfxError::Config(
                "BFX_API_KEY is set but BFX_API_SECRET is missing".to_string(),
            ));
        }
        (None, Some(_)) => {
            return Err(crate::BfxError::Config(
                "BFX_API_SECRET is set but BFX_API_KEY is missing".to_string(),
            ));
        }
        _ => {}
    }

    Ok(AppConfig {
        bitfinex: BitfinexConfig {
            api_url,
            api_key,
            api_secret,
            ca_bundle: non_empty_var("BFX_CA_BUNDLE").map(PathBuf::from),
        },
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Serializes tests that touch the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Temporarily sets env vars, runs `f`, then restores the originals.
    pub(crate) fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let originals: Vec<(&str, Option<String>)> = vars
            .iter()
            .map(|(k, _)| (*k, std::env::var(k).ok()))
            .collect();

        for (k, v) in vars {
            // SAFETY: ENV_LOCK keeps other env tests from reading concurrently.
            unsafe {
                match v {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }

        f();

        for (k, original) in originals {
            // SAFETY: restoring original values under the same lock.
            unsafe {
                match original {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn defaults_without_env_vars() {
        with_env(
            &[
                ("BFX_API_KEY", None),
                ("BFX_API_SECRET", None),
                ("BFX_API_URL", None),
                ("BFX_CA_BUNDLE", None),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.bitfinex.api_url, DEFAULT_API_URL);
                assert!(config.bitfinex.api_key.is_none());
                assert!(config.bitfinex.api_secret.is_none());
                assert!(config.bitfinex.ca_bundle.is_none());
            },
        );
    }

    #[test]
    fn loads_credentials_from_env() {
        with_env(
            &[
                ("BFX_API_KEY", Some("test-key")),
                ("BFX_API_SECRET", Some("test-secret")),
                ("BFX_API_URL", None),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.bitfinex.api_key.as_deref(), Some("test-key"));
                assert_eq!(config.bitfinex.api_secret.as_deref(), Some("test-secret"));
            },
        );
    }

    #[test]
    fn custom_api_url_gets_trailing_slash() {
        with_env(
            &[
                ("BFX_API_KEY", None),
                ("BFX_API_SECRET", None),
                ("BFX_API_URL", Some("https://test.example.com/v2")),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.bitfinex.api_url, "https://test.example.com/v2/");
            },
        );
    }

    #[test]
    fn ca_bundle_path_is_read() {
        with_env(
            &[
                ("BFX_API_KEY", None),
                ("BFX_API_SECRET", None),
                ("BFX_CA_BUNDLE", Some("/etc/ssl/bfx.pem")),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(
                    config.bitfinex.ca_bundle,
                    Some(PathBuf::from("/etc/ssl/bfx.pem"))
                );
            },
        );
    }

    #[test]
    fn rejects_key_without_secret() {
        with_env(
            &[("BFX_API_KEY", Some("key-only")), ("BFX_API_SECRET", None)],
            || {
                let err = fetch_config().unwrap_err();
                assert!(err.to_string().contains("BFX_API_SECRET is missing"));
            },
        );
    }

    #[test]
    fn rejects_secret_without_key() {
        with_env(
            &[("BFX_API_KEY", None), ("BFX_API_SECRET", Some("secret-only"))],
            || {
                let err = fetch_config().unwrap_err();
                assert!(err.to_string().contains("BFX_API_KEY is missing"));
            },
        );
    }

    #[test]
    fn empty_values_treated_as_absent() {
        with_env(
            &[
                ("BFX_API_KEY", Some("")),
                ("BFX_API_SECRET", Some("")),
                ("BFX_API_URL", Some("")),
                ("BFX_CA_BUNDLE", Some("")),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.bitfinex.api_url, DEFAULT_API_URL);
                assert!(config.bitfinex.api_key.is_none());
                assert!(config.bitfinex.api_secret.is_none());
                assert!(config.bitfinex.ca_bundle.is_none());
            },
        );
    }
}
