//! `AppConfig::from_env` reads the real process environment, so these
//! tests are serialized.

mod common;

use std::time::Duration;

use serial_test::serial;
use studenthub::config::app_config::{EXEMPT_PATHS_VAR, JWT_SECRET_VAR, TOKEN_TTL_VAR};
use studenthub::{AppConfig, AppError};

struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn set(vars: &[(&'static str, Option<&str>)]) -> Self {
        let saved = vars
            .iter()
            .map(|(key, value)| {
                let previous = std::env::var(key).ok();
                match value {
                    Some(v) => std::env::set_var(key, v),
                    None => std::env::remove_var(key),
                }
                (*key, previous)
            })
            .collect();
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in &self.saved {
            match previous {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

#[test]
#[serial]
fn from_env_reads_secret_ttl_and_exempt_paths() {
    let _guard = EnvGuard::set(&[
        (JWT_SECRET_VAR, Some("env-secret")),
        (TOKEN_TTL_VAR, Some("120")),
        (EXEMPT_PATHS_VAR, Some("/open, /health")),
    ]);

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.security.jwt_secret, b"env-secret".to_vec());
    assert_eq!(config.security.token_ttl, Duration::from_secs(120));
    assert!(config.exempt_paths.is_exempt("/open"));
    assert!(config.exempt_paths.is_exempt("/health"));
    assert!(!config.exempt_paths.is_exempt("/docs"));
}

#[test]
#[serial]
fn from_env_without_secret_fails() {
    let _guard = EnvGuard::set(&[(JWT_SECRET_VAR, None)]);

    let err = AppConfig::from_env().unwrap_err();
    assert!(matches!(err, AppError::Config { .. }));
}
