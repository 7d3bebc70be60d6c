//! Create an administrator account out-of-band.
//!
//! Administrators cannot be registered over HTTP; operators run this binary
//! against the production database instead:
//!
//! ```text
//! create-admin --email admin@campus.edu --name "Grace Hopper" --password '...'
//! ```
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use complaints::domain::{NewAdmin, NewPassword, StudentAccountsService};
use complaints::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use complaints::outbound::security::Argon2PasswordHasher;
use mockable::DefaultClock;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

const PASSWORD_ENV: &str = "ADMIN_PASSWORD";
const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// `create-admin` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "create-admin",
    about = "Create an administrator account in the complaints database",
    version
)]
struct CliArgs {
    /// Administrator email; stored lower-cased and used to log in.
    #[arg(long, value_name = "email")]
    email: String,
    /// Display name.
    #[arg(long, value_name = "name")]
    name: String,
    /// Initial password. Falls back to `ADMIN_PASSWORD` when omitted.
    #[arg(long, value_name = "password")]
    password: Option<String>,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::parse();
    let password = resolve_setting(args.password, PASSWORD_ENV, "--password")?;
    let database_url = resolve_setting(args.database_url, DATABASE_URL_ENV, "--database-url")?;

    let admin = NewAdmin::try_from_parts(&args.email, &args.name).map_err(invalid_input)?;
    let password = NewPassword::new(&password).map_err(invalid_input)?;

    run_pending_migrations(&database_url)
        .await
        .map_err(|error| io::Error::other(format!("apply migrations: {error}")))?;
    let pool = DbPool::new(PoolConfig::new(&database_url).with_max_size(1))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let service = StudentAccountsService::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(DefaultClock),
    );
    let user = service
        .create_admin(admin, password)
        .await
        .map_err(|error| io::Error::other(format!("create administrator: {error}")))?;

    let email = user.email.as_ref().map(ToString::to_string).unwrap_or_default();
    writeln!(io::stdout().lock(), "created administrator {email} ({})", user.id)
}

fn invalid_input(error: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, error.to_string())
}

fn resolve_setting(explicit: Option<String>, env_name: &str, flag: &str) -> io::Result<String> {
    resolve_with(explicit, env::var(env_name).ok(), env_name, flag)
}

fn resolve_with(
    explicit: Option<String>,
    from_env: Option<String>,
    env_name: &str,
    flag: &str,
) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(invalid_input(format!("{flag} must not be empty when provided")));
        }
        return Ok(value);
    }

    match from_env {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(invalid_input(format!("{env_name} must not be empty"))),
        None => Err(invalid_input(format!("missing value: set {flag} or {env_name}"))),
    }
}
