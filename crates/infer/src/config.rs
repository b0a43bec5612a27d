//! Endpoint, credential and model, read once from the environment.

use std::fmt;

use thiserror::Error;

pub const BASE_URL_VAR: &str = "INFER_BASE_URL";
pub const API_KEY_VAR: &str = "INFER_API_KEY";
pub const MODEL_VAR: &str = "INFER_MODEL";

/// Path appended to the base URL.
const COMPLETIONS_PATH: &str = "chat/completions";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required variables are unset or empty. All of them are
    /// listed so they can be fixed in one go.
    #[error("missing required environment variables.{}", please_set(.0))]
    Missing(Vec<&'static str>),
}

fn please_set(names: &[&'static str]) -> String {
    names
        .iter()
        .map(|name| format!("\nPlease set {name} environment variable."))
        .collect()
}

/// Settings for one request.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    base_url: String,
    api_key: String,
    model: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

impl Config {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Reads [`BASE_URL_VAR`], [`API_KEY_VAR`] and [`MODEL_VAR`] from the
    /// process environment.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Missing`] listing every variable that is unset, empty or
    /// not valid Unicode.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`Config::from_env`], with values supplied by `lookup`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Missing`] listing every variable `lookup` has no
    /// non-empty value for.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut require = |name: &'static str| {
            lookup(name).filter(|v| !v.is_empty()).unwrap_or_else(|| {
                missing.push(name);
                String::new()
            })
        };
        let base_url = require(BASE_URL_VAR);
        let api_key = require(API_KEY_VAR);
        let model = require(MODEL_VAR);

        if missing.is_empty() {
            Ok(Self::new(base_url, api_key, model))
        } else {
            Err(ConfigError::Missing(missing))
        }
    }

    /// The chat-completions URL: the base URL, a `/` unless it already ends
    /// with one, then `chat/completions`.
    #[must_use]
    pub fn endpoint(&self) -> String {
        let sep = if self.base_url.ends_with('/') { "" } else { "/" };
        format!("{}{sep}{COMPLETIONS_PATH}", self.base_url)
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}
