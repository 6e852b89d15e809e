//! Session cookie settings read from the process environment.
//!
//! | Variable                  | Values                   | Debug default |
//! |---------------------------|--------------------------|---------------|
//! | `SESSION_KEY_FILE`        | path                     | `/var/run/secrets/session_key` |
//! | `SESSION_COOKIE_SECURE`   | `1`/`0`/`true`/`false`…  | `true`        |
//! | `SESSION_SAMESITE`        | `Strict`/`Lax`/`None`    | `Lax`         |
//! | `SESSION_ALLOW_EPHEMERAL` | boolean                  | `false`       |
//!
//! Debug builds log a warning and fall back to the default for missing or
//! malformed values. Release builds reject them.

use std::path::PathBuf;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite, time::Duration};
use mockable::Env;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

pub const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
pub const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";

const DEFAULT_KEY_PATH: &str = "/var/run/secrets/session_key";
const MIN_KEY_LEN: usize = 64;
/// `Key::derive_from` panics below this length.
const MIN_DERIVABLE_LEN: usize = 32;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";
/// Sessions outlive a single desk shift.
const SESSION_TTL_HOURS: i64 = 12;

/// How strictly the environment is validated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Mode of the running binary.
    ///
    /// ```rust
    /// use frontdesk::inbound::http::session_config::BuildMode;
    ///
    /// let expected = if cfg!(debug_assertions) { BuildMode::Debug } else { BuildMode::Release };
    /// assert_eq!(BuildMode::current(), expected);
    /// ```
    #[must_use]
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {MIN_KEY_LEN} bytes, got {length}")]
    KeyTooShort { path: PathBuf, length: usize },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Validated cookie session settings.
#[derive(Clone)]
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

impl std::fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSettings")
            .field("key", &self.fingerprint())
            .field("cookie_secure", &self.cookie_secure)
            .field("same_site", &self.same_site)
            .finish()
    }
}

impl SessionSettings {
    /// Read and validate the session variables from `env`.
    pub fn from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Self, SessionConfigError> {
        let cookie_secure =
            Toggle::new(env, mode, COOKIE_SECURE_ENV).resolve(parse_bool, true, BOOL_EXPECTED)?;
        let same_site = Toggle::new(env, mode, SAMESITE_ENV).resolve(
            parse_same_site,
            match mode {
                BuildMode::Debug => SameSite::Lax,
                BuildMode::Release => SameSite::Strict,
            },
            SAMESITE_EXPECTED,
        )?;
        if same_site == SameSite::None && !cookie_secure {
            match mode {
                BuildMode::Release => return Err(SessionConfigError::InsecureSameSiteNone),
                BuildMode::Debug => {
                    warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it");
                }
            }
        }
        let allow_ephemeral =
            Toggle::new(env, mode, ALLOW_EPHEMERAL_ENV).resolve(parse_bool, false, BOOL_EXPECTED)?;
        if allow_ephemeral && mode == BuildMode::Release {
            return Err(SessionConfigError::EphemeralNotAllowed);
        }
        let path = PathBuf::from(
            env.string(KEY_FILE_ENV)
                .unwrap_or_else(|| DEFAULT_KEY_PATH.to_owned()),
        );
        let key = load_key(path, mode, allow_ephemeral)?;
        Ok(Self {
            key,
            cookie_secure,
            same_site,
        })
    }

    /// First eight bytes of the SHA-256 of the signing key, hex encoded.
    /// Logged at startup so operators can tell which key is live.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.key.signing());
        hex::encode(digest.get(..8).unwrap_or_default())
    }

    /// Cookie-backed session middleware using these settings.
    #[must_use]
    pub fn middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE.to_owned())
            .cookie_path("/".to_owned())
            .cookie_secure(self.cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(self.same_site)
            .cookie_content_security(CookieContentSecurity::Private)
            .session_lifecycle(
                PersistentSession::default().session_ttl(Duration::hours(SESSION_TTL_HOURS)),
            )
            .build()
    }
}

/// One environment variable under the build mode's leniency rules.
struct Toggle<'a, E> {
    env: &'a E,
    mode: BuildMode,
    name: &'static str,
}

impl<'a, E: Env> Toggle<'a, E> {
    fn new(env: &'a E, mode: BuildMode, name: &'static str) -> Self {
        Self { env, mode, name }
    }

    fn resolve<T: std::fmt::Debug>(
        &self,
        parse: fn(&str) -> Option<T>,
        fallback: T,
        expected: &'static str,
    ) -> Result<T, SessionConfigError> {
        let Some(raw) = self.env.string(self.name) else {
            return match self.mode {
                BuildMode::Debug => {
                    warn!(variable = self.name, default = ?fallback, "session variable not set");
                    Ok(fallback)
                }
                BuildMode::Release => Err(SessionConfigError::MissingEnv { name: self.name }),
            };
        };
        if let Some(value) = parse(raw.trim()) {
            return Ok(value);
        }
        match self.mode {
            BuildMode::Debug => {
                warn!(variable = self.name, value = %raw, default = ?fallback, "invalid session variable");
                Ok(fallback)
            }
            BuildMode::Release => Err(SessionConfigError::InvalidEnv {
                name: self.name,
                value: raw,
                expected,
            }),
        }
    }
}

fn load_key(path: PathBuf, mode: BuildMode, allow_ephemeral: bool) -> Result<Key, SessionConfigError> {
    match std::fs::read(&path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            let length = bytes.len();
            if mode == BuildMode::Release && length < MIN_KEY_LEN {
                return Err(SessionConfigError::KeyTooShort { path, length });
            }
            if length < MIN_DERIVABLE_LEN {
                warn!(path = %path.display(), length, "session key too short; using an ephemeral key");
                return Ok(Key::generate());
            }
            Ok(Key::derive_from(&bytes))
        }
        Err(source) if mode == BuildMode::Debug || allow_ephemeral => {
            warn!(path = %path.display(), error = %source, "using an ephemeral session key");
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.to_ascii_lowercase().as_str() {
        "strict" => Some(SameSite::Strict),
        "lax" => Some(SameSite::Lax),
        "none" => Some(SameSite::None),
        _ => None,
    }
}

#[cfg(test)]
#[path = "session_config_tests.rs"]
mod tests;
