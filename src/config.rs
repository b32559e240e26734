//! Environment configuration.
//!
//! Three variables, loadable from a `.env` file:
//!
//! - `ELAB_URL` — API base URL (e.g. `https://elab.example.org/api/v2/`)
//! - `ELAB_API_KEY` — the API key
//! - `ELAB_CA_BUNDLE` — optional PEM bundle for a custom trust root,
//!   with literal `\n` two-character sequences between lines (the form
//!   a multi-line PEM survives in as an environment variable)

use crate::error::ConfigError;
use std::env;
use std::fmt;

pub const ENV_URL: &str = "ELAB_URL";
pub const ENV_API_KEY: &str = "ELAB_API_KEY";
pub const ENV_CA_BUNDLE: &str = "ELAB_CA_BUNDLE";

/// Connection settings for an [`ElabClient`](crate::client::ElabClient).
#[derive(Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
    /// Custom trust-root PEM bundle, already unescaped.
    pub ca_bundle: Option<String>,
}

impl Config {
    /// Read configuration from the process environment, loading a `.env`
    /// file first when one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let base_url = env::var(ENV_URL).map_err(|_| ConfigError::MissingVar(ENV_URL))?;
        let api_key = env::var(ENV_API_KEY).map_err(|_| ConfigError::MissingVar(ENV_API_KEY))?;
        let ca_bundle = env::var(ENV_CA_BUNDLE).ok().map(|raw| unescape_pem(&raw));
        Ok(Self {
            base_url,
            api_key,
            ca_bundle,
        })
    }
}

// The API key never appears in Debug output.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &crate::http::client::REDACTED)
            .field("ca_bundle", &self.ca_bundle.as_deref().map(|_| "<pem bundle>"))
            .finish()
    }
}

/// Rebuild a PEM bundle from its environment form: every line ends up
/// newline-terminated.
fn unescape_pem(raw: &str) -> String {
    raw.split("\\n").map(|line| format!("{line}\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_pem_splits_on_escaped_newlines() {
        let raw = r"-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----";
        let pem = unescape_pem(raw);
        assert_eq!(
            pem,
            "-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n"
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config {
            base_url: "https://elab.example.org/api/v2/".into(),
            api_key: "super-secret".into(),
            ca_bundle: None,
        };
        let shown = format!("{config:?}");
        assert!(!shown.contains("super-secret"));
        assert!(shown.contains("**REDACTED**"));
    }
}
