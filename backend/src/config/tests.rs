//! Unit tests for configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;

const GOOD_SECRET: &str = "0123456789abcdef0123456789abcdef";

fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn expect_error(result: Result<AppConfig, ConfigError>, label: &str) -> ConfigError {
    match result {
        Ok(_) => panic!("{label}"),
        Err(error) => error,
    }
}

#[rstest]
fn defaults_apply_when_only_the_secret_is_set() {
    let env = mock_env(&[(JWT_SECRET_ENV, GOOD_SECRET)]);

    let config = AppConfig::from_env(&env, BuildMode::Release).expect("valid config");

    assert!(config.database_url.is_none());
    assert_eq!(config.bind_addr, "0.0.0.0:5000".parse().expect("socket address"));
    assert_eq!(config.jwt_secret.as_slice(), GOOD_SECRET.as_bytes());
}

#[rstest]
fn explicit_values_are_honoured() {
    let env = mock_env(&[
        (JWT_SECRET_ENV, GOOD_SECRET),
        (DATABASE_URL_ENV, " postgres://localhost/complaints "),
        (PORT_ENV, "8081"),
        (BIND_HOST_ENV, "127.0.0.1"),
    ]);

    let config = AppConfig::from_env(&env, BuildMode::Release).expect("valid config");

    assert_eq!(
        config.database_url.as_deref(),
        Some("postgres://localhost/complaints")
    );
    assert_eq!(config.bind_addr, "127.0.0.1:8081".parse().expect("socket address"));
}

#[rstest]
fn blank_database_url_means_in_memory() {
    let env = mock_env(&[(JWT_SECRET_ENV, GOOD_SECRET), (DATABASE_URL_ENV, "   ")]);

    let config = AppConfig::from_env(&env, BuildMode::Release).expect("valid config");

    assert!(config.database_url.is_none());
}

#[rstest]
fn release_requires_a_secret() {
    let env = mock_env(&[]);

    let err = expect_error(
        AppConfig::from_env(&env, BuildMode::Release),
        "expected a missing secret to fail",
    );

    assert_eq!(
        err,
        ConfigError::MissingEnv {
            name: JWT_SECRET_ENV
        }
    );
}

#[rstest]
fn release_rejects_short_secrets() {
    let env = mock_env(&[(JWT_SECRET_ENV, "too-short")]);

    let err = expect_error(
        AppConfig::from_env(&env, BuildMode::Release),
        "expected a short secret to fail",
    );

    assert_eq!(
        err,
        ConfigError::SecretTooShort {
            length: 9,
            min_len: JWT_SECRET_MIN_LEN
        }
    );
}

#[rstest]
fn debug_falls_back_to_an_ephemeral_secret() {
    let env = mock_env(&[]);

    let first = AppConfig::from_env(&env, BuildMode::Debug).expect("debug config");
    let second = AppConfig::from_env(&env, BuildMode::Debug).expect("debug config");

    assert_eq!(first.jwt_secret.len(), JWT_SECRET_MIN_LEN);
    assert_ne!(first.jwt_secret.as_slice(), second.jwt_secret.as_slice());
}

#[rstest]
fn debug_tolerates_short_secrets() {
    let env = mock_env(&[(JWT_SECRET_ENV, "dev")]);

    let config = AppConfig::from_env(&env, BuildMode::Debug).expect("debug config");

    assert_eq!(config.jwt_secret.as_slice(), b"dev");
}

#[rstest]
#[case(PORT_ENV, "http")]
#[case(PORT_ENV, "0")]
#[case(PORT_ENV, "70000")]
#[case(BIND_HOST_ENV, "localhost")]
fn malformed_listener_settings_are_rejected(#[case] name: &'static str, #[case] value: &str) {
    let env = mock_env(&[(JWT_SECRET_ENV, GOOD_SECRET), (name, value)]);

    let err = expect_error(
        AppConfig::from_env(&env, BuildMode::Debug),
        "expected malformed listener settings to fail",
    );

    assert!(matches!(err, ConfigError::InvalidEnv { name: actual, .. } if actual == name));
}

#[rstest]
fn debug_output_redacts_secrets() {
    let env = mock_env(&[
        (JWT_SECRET_ENV, GOOD_SECRET),
        (DATABASE_URL_ENV, "postgres://user:hunter2@db/complaints"),
    ]);
    let config = AppConfig::from_env(&env, BuildMode::Release).expect("valid config");

    let rendered = format!("{config:?}");

    assert!(!rendered.contains("hunter2"));
    assert!(!rendered.contains(GOOD_SECRET));
    assert!(rendered.contains("<redacted>"));
}

#[rstest]
fn admin_seed_is_read_with_a_default_name() {
    let env = mock_env(&[
        (JWT_SECRET_ENV, GOOD_SECRET),
        (ADMIN_EMAIL_ENV, " admin@campus.edu "),
        (ADMIN_PASSWORD_ENV, "admin-secret"),
    ]);

    let config = AppConfig::from_env(&env, BuildMode::Release).expect("valid config");
    let seed = config.admin_seed.expect("admin seed");

    assert_eq!(seed.email, "admin@campus.edu");
    assert_eq!(seed.name, "Administrator");
    assert_eq!(seed.password.as_str(), "admin-secret");
    assert!(!format!("{seed:?}").contains("admin-secret"));
}

#[rstest]
fn admin_seed_is_absent_by_default() {
    let env = mock_env(&[(JWT_SECRET_ENV, GOOD_SECRET)]);

    let config = AppConfig::from_env(&env, BuildMode::Release).expect("valid config");

    assert!(config.admin_seed.is_none());
}

#[rstest]
#[case(ADMIN_EMAIL_ENV, "admin@campus.edu", ADMIN_PASSWORD_ENV)]
#[case(ADMIN_PASSWORD_ENV, "admin-secret", ADMIN_EMAIL_ENV)]
fn half_configured_admin_seed_is_rejected(
    #[case] present: &'static str,
    #[case] value: &str,
    #[case] missing: &'static str,
) {
    let env = mock_env(&[(JWT_SECRET_ENV, GOOD_SECRET), (present, value)]);

    let err = expect_error(
        AppConfig::from_env(&env, BuildMode::Release),
        "expected a partial admin seed to fail",
    );

    assert_eq!(err, ConfigError::MissingEnv { name: missing });
}
