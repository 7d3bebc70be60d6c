//! Environment-driven application configuration.
//!
//! Settings are read through [`mockable::Env`] so parsing and validation can
//! be tested without touching the process environment.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use mockable::Env;
use tracing::warn;
use uuid::Uuid;
use zeroize::Zeroizing;

/// Database connection string; absent means the in-memory store.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Secret used to sign bearer tokens.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
/// Listener port.
pub const PORT_ENV: &str = "PORT";
/// Listener address.
pub const BIND_HOST_ENV: &str = "BIND_HOST";
/// Email of the administrator ensured at startup.
pub const ADMIN_EMAIL_ENV: &str = "ADMIN_EMAIL";
/// Display name of the administrator ensured at startup.
pub const ADMIN_NAME_ENV: &str = "ADMIN_NAME";
/// Password of the administrator ensured at startup.
pub const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";

/// Minimum signing secret length accepted in release builds.
pub const JWT_SECRET_MIN_LEN: usize = 32;
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_ADMIN_NAME: &str = "Administrator";

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing secret and fall back to an ephemeral one.
    Debug,
    /// Release builds require an explicit, sufficiently long secret.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use complaints::config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while validating configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
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
    /// The signing secret is too short for release builds.
    #[error("JWT_SECRET too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
}

/// Administrator account created at startup unless its email is taken.
///
/// Without one, a server on the in-memory store has no way to gain an
/// administrator.
pub struct AdminSeed {
    /// Login email; validated and lower-cased when the account is created.
    pub email: String,
    /// Display name, `Administrator` unless `ADMIN_NAME` is set.
    pub name: String,
    /// Initial password.
    pub password: Zeroizing<String>,
}

impl fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSeed")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated application settings.
pub struct AppConfig {
    /// PostgreSQL connection string, if a database is configured.
    pub database_url: Option<String>,
    /// Token signing secret.
    pub jwt_secret: Zeroizing<Vec<u8>>,
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Administrator ensured at startup, when both `ADMIN_EMAIL` and
    /// `ADMIN_PASSWORD` are set.
    pub admin_seed: Option<AdminSeed>,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "<redacted>"),
            )
            .field("jwt_secret", &"<redacted>")
            .field("bind_addr", &self.bind_addr)
            .field("admin_seed", &self.admin_seed)
            .finish()
    }
}

impl AppConfig {
    /// Build settings from environment variables and build mode.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a value is malformed, when release
    /// builds lack a long enough `JWT_SECRET`, or when only one of
    /// `ADMIN_EMAIL` and `ADMIN_PASSWORD` is set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use complaints::config::{AppConfig, BuildMode};
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "JWT_SECRET" => Some("0123456789abcdef0123456789abcdef".to_owned()),
    ///     "PORT" => Some("8080".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let config = AppConfig::from_env(&env, BuildMode::Release).expect("valid config");
    /// assert_eq!(config.bind_addr.port(), 8080);
    /// assert!(config.database_url.is_none());
    /// ```
    pub fn from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Self, ConfigError> {
        let database_url = database_url_from_env(env);
        let jwt_secret = jwt_secret_from_env(env, mode)?;
        let bind_addr = SocketAddr::new(host_from_env(env)?, port_from_env(env)?);
        let admin_seed = admin_seed_from_env(env)?;
        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            admin_seed,
        })
    }
}

fn non_blank<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn database_url_from_env<E: Env>(env: &E) -> Option<String> {
    let url = non_blank(env, DATABASE_URL_ENV);
    if url.is_none() {
        warn!("DATABASE_URL not set; using the in-memory store, data is lost on restart");
    }
    url
}

fn jwt_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Zeroizing<Vec<u8>>, ConfigError> {
    match env.string(JWT_SECRET_ENV).filter(|value| !value.is_empty()) {
        Some(value) => {
            let secret = Zeroizing::new(value.into_bytes());
            let length = secret.len();
            if length < JWT_SECRET_MIN_LEN {
                if mode.is_debug() {
                    warn!(length, "JWT_SECRET shorter than recommended");
                } else {
                    return Err(ConfigError::SecretTooShort {
                        length,
                        min_len: JWT_SECRET_MIN_LEN,
                    });
                }
            }
            Ok(secret)
        }
        None => {
            if mode.is_debug() {
                warn!("JWT_SECRET not set; using an ephemeral secret (dev only)");
                Ok(ephemeral_secret())
            } else {
                Err(ConfigError::MissingEnv {
                    name: JWT_SECRET_ENV,
                })
            }
        }
    }
}

fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut bytes = Vec::with_capacity(JWT_SECRET_MIN_LEN);
    bytes.extend_from_slice(Uuid::new_v4().as_bytes());
    bytes.extend_from_slice(Uuid::new_v4().as_bytes());
    Zeroizing::new(bytes)
}

fn port_from_env<E: Env>(env: &E) -> Result<u16, ConfigError> {
    non_blank(env, PORT_ENV).map_or(Ok(DEFAULT_PORT), |value| {
        match value.parse::<u16>() {
            Ok(port) if port != 0 => Ok(port),
            _ => Err(ConfigError::InvalidEnv {
                name: PORT_ENV,
                value,
                expected: "a port number between 1 and 65535",
            }),
        }
    })
}

fn host_from_env<E: Env>(env: &E) -> Result<IpAddr, ConfigError> {
    non_blank(env, BIND_HOST_ENV).map_or(Ok(DEFAULT_HOST), |value| {
        value.parse::<IpAddr>().map_err(|_| ConfigError::InvalidEnv {
            name: BIND_HOST_ENV,
            value,
            expected: "an IPv4 or IPv6 address",
        })
    })
}

fn admin_seed_from_env<E: Env>(env: &E) -> Result<Option<AdminSeed>, ConfigError> {
    let email = non_blank(env, ADMIN_EMAIL_ENV);
    let password = env
        .string(ADMIN_PASSWORD_ENV)
        .filter(|value| !value.is_empty())
        .map(Zeroizing::new);
    match (email, password) {
        (None, None) => Ok(None),
        (Some(email), Some(password)) => Ok(Some(AdminSeed {
            email,
            name: non_blank(env, ADMIN_NAME_ENV).unwrap_or_else(|| DEFAULT_ADMIN_NAME.to_owned()),
            password,
        })),
        (Some(_), None) => Err(ConfigError::MissingEnv {
            name: ADMIN_PASSWORD_ENV,
        }),
        (None, Some(_)) => Err(ConfigError::MissingEnv {
            name: ADMIN_EMAIL_ENV,
        }),
    }
}

#[cfg(test)]
mod tests;
