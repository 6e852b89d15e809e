//! Application settings loaded via OrthoConfig.
//!
//! Every field can be set from the command line, a config file, or a
//! `FRONTDESK_`-prefixed environment variable (`FRONTDESK_DATABASE_URL`,
//! `FRONTDESK_ALLOWED_ORIGINS`, …). Session cookie settings are read
//! separately; see [`crate::inbound::http::session_config`].

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Deserializer};
use zeroize::Zeroizing;

use crate::outbound::gemini::DEFAULT_GEMINI_ENDPOINT;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
/// Password for the fallback administrator when none is configured.
pub const DEFAULT_BOOTSTRAP_PASSWORD: &str = "admin123";

#[derive(Debug, thiserror::Error)]
#[error("invalid bind address '{value}': {source}")]
pub struct BindAddrError {
    value: String,
    #[source]
    source: std::net::AddrParseError,
}

/// Process-wide configuration.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FRONTDESK")]
pub struct AppSettings {
    /// Listener address, `host:port`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server keeps everything in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Browser origins allowed to open `/ws`; comma-separated in the
    /// environment.
    #[serde(default, deserialize_with = "origin_list")]
    pub allowed_origins: Option<Vec<String>>,
    /// Gemini API key; the assistant degrades without one.
    pub gemini_api_key: Option<String>,
    /// Gemini REST base URL.
    pub gemini_endpoint: Option<String>,
    /// Per-request timeout for completion calls.
    #[ortho_config(default = 20)]
    pub ai_timeout_secs: u64,
    /// Password for the fallback administrator created on an empty user table.
    pub bootstrap_admin_password: Option<String>,
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("db_max_connections", &self.db_max_connections)
            .field("allowed_origins", &self.allowed_origins)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "<set>"))
            .field("gemini_endpoint", &self.gemini_endpoint)
            .field("ai_timeout_secs", &self.ai_timeout_secs)
            .finish_non_exhaustive()
    }
}

impl AppSettings {
    /// Parsed listener address.
    pub fn bind_addr(&self) -> Result<SocketAddr, BindAddrError> {
        let value = self
            .bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .trim();
        value.parse().map_err(|source| BindAddrError {
            value: value.to_owned(),
            source,
        })
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
            .max(1)
    }

    /// Allowed origins with blanks dropped.
    pub fn allowed_origins(&self) -> Vec<String> {
        let Some(origins) = self.allowed_origins.as_ref() else {
            return vec![DEFAULT_ALLOWED_ORIGIN.to_owned()];
        };
        origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// API key, if configured and non-blank.
    pub fn gemini_api_key(&self) -> Option<Zeroizing<String>> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| Zeroizing::new(key.to_owned()))
    }

    pub fn gemini_endpoint(&self) -> &str {
        self.gemini_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_GEMINI_ENDPOINT)
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }

    /// Configured bootstrap password, or `None` when the default applies.
    pub fn bootstrap_admin_password(&self) -> Option<Zeroizing<String>> {
        self.bootstrap_admin_password
            .as_deref()
            .filter(|password| !password.is_empty())
            .map(|password| Zeroizing::new(password.to_owned()))
    }
}

/// Accept origins either as one comma-joined string or as a list.
fn origin_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Origins {
        Joined(String),
        Listed(Vec<String>),
    }

    Ok(
        Option::<Origins>::deserialize(deserializer)?.map(|origins| match origins {
            Origins::Joined(joined) => joined.split(',').map(str::to_owned).collect(),
            Origins::Listed(listed) => listed,
        }),
    )
}
