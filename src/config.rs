//! Runtime Configuration
//!
//! Both binaries are configured from the process environment. A `.env` file in the
//! working directory is honoured through `dotenvy`.
//!
//! Loading is written against a lookup function so tests can feed values without
//! touching the real environment.

use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_GROQ_MODEL: &str = "llama3-70b-8192";

pub const ENV_ALGOLIA_APP_ID: &str = "ALGOLIA_APP_ID";
pub const ENV_ALGOLIA_SEARCH_KEY: &str = "ALGOLIA_SEARCH_KEY";
pub const ENV_ALGOLIA_ADMIN_KEY: &str = "ALGOLIA_ADMIN_KEY";
pub const ENV_ALGOLIA_INDEX_NAME: &str = "ALGOLIA_INDEX_NAME";
pub const ENV_GROQ_API_KEY: &str = "GROQ_API_KEY";
pub const ENV_GROQ_MODEL: &str = "GROQ_MODEL";
pub const ENV_PORT: &str = "PORT";

/// Settings for the search backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub algolia_app_id: String,
    /// Search-only key; the server never writes to the index.
    pub algolia_search_key: String,
    pub algolia_index_name: String,
    pub groq_api_key: String,
    pub groq_model: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match optional(&lookup, ENV_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("{} must be a port number, got {:?}", ENV_PORT, raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            algolia_app_id: required(&lookup, ENV_ALGOLIA_APP_ID)?,
            algolia_search_key: required(&lookup, ENV_ALGOLIA_SEARCH_KEY)?,
            algolia_index_name: required(&lookup, ENV_ALGOLIA_INDEX_NAME)?,
            groq_api_key: required(&lookup, ENV_GROQ_API_KEY)?,
            groq_model: optional(&lookup, ENV_GROQ_MODEL)
                .unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            port,
        })
    }
}

/// Settings for the catalog loader.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    pub algolia_app_id: String,
    /// Write-enabled key, required by the batch endpoint.
    pub algolia_admin_key: String,
    pub algolia_index_name: String,
}

impl LoaderConfig {
    pub fn from_env(index_override: Option<String>) -> Result<Self> {
        Self::from_lookup(env_lookup, index_override)
    }

    /// `index_override` (the `--index` flag) wins over `ALGOLIA_INDEX_NAME`.
    pub fn from_lookup<F>(lookup: F, index_override: Option<String>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let algolia_index_name = match index_override.filter(|name| !name.trim().is_empty()) {
            Some(name) => name,
            None => required(&lookup, ENV_ALGOLIA_INDEX_NAME)?,
        };

        Ok(Self {
            algolia_app_id: required(&lookup, ENV_ALGOLIA_APP_ID)?,
            algolia_admin_key: required(&lookup, ENV_ALGOLIA_ADMIN_KEY)?,
            algolia_index_name,
        })
    }
}

fn env_lookup(key: &str) -> Option<String> {
    dotenvy::var(key).ok()
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).with_context(|| format!("{} is not set", key))
}
