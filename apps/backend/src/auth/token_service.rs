//! Issues and validates signed, time-limited identity credentials.
//!
//! Stateless: a `TokenService` only holds the signing configuration and a
//! clock, both read-only, so it is cloned freely into every worker and
//! middleware instance.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::claims::Claims;
use crate::auth::clock::{Clock, SystemClock};
use crate::auth::jwt::{mint_access_token, verify_access_token, CredentialError};
use crate::state::security_config::SecurityConfig;
use crate::AppError;

#[derive(Debug, Clone)]
pub struct TokenService {
    security: Arc<SecurityConfig>,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(security: SecurityConfig) -> Self {
        Self::with_clock(security, Arc::new(SystemClock))
    }

    pub fn with_clock(security: SecurityConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            security: Arc::new(security),
            clock,
        }
    }

    /// Issue a credential for `identity` expiring `ttl` from now.
    pub fn issue(&self, identity: &str, ttl: Duration) -> Result<String, AppError> {
        mint_access_token(identity, ttl, self.clock.now(), &self.security)
    }

    /// Issue a credential with the configured session lifetime.
    pub fn issue_session(&self, identity: &str) -> Result<String, AppError> {
        self.issue(identity, self.security.token_ttl)
    }

    pub fn validate(&self, credential: &str) -> Result<Claims, CredentialError> {
        verify_access_token(credential, self.clock.now(), &self.security)
    }

    pub fn is_valid(&self, credential: &str) -> bool {
        self.validate(credential).is_ok()
    }

    pub fn session_ttl(&self) -> Duration {
        self.security.token_ttl
    }

    /// The clock credentials are judged against; shared with other
    /// timestamping services so simulated time moves them together.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }
}
