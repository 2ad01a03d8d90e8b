#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use actix_web::web;
use studenthub::{AppState, ManualClock, SecurityConfig, TokenService};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";
pub const HOUR: Duration = Duration::from_secs(3600);

/// Token service on a manual clock starting at the current wall time.
pub fn manual_tokens() -> (TokenService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(SystemTime::now()));
    let tokens = TokenService::with_clock(SecurityConfig::new(TEST_SECRET), clock.clone());
    (tokens, clock)
}

pub fn app_state(tokens: &TokenService) -> web::Data<AppState> {
    web::Data::new(AppState::new(tokens.clone()))
}
