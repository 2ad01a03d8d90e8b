#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::{Claims, Clock, CredentialError, ManualClock, SystemClock, TokenService};
pub use config::{AppConfig, ExemptPaths};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::CurrentUser;
pub use middleware::access_log::AccessLog;
pub use middleware::auth_gate::AuthGate;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use services::posts::PostBoard;
pub use services::users::UserDirectory;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
