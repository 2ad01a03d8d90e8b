//! Claims carried inside issued credentials.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Decoded credential payload.
///
/// The identity travels as `email` on the wire; that is what clients of the
/// student collaboration API already read out of their tokens. Only `email`
/// and `exp` are required.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    #[serde(rename = "email")]
    pub identity: String,
    /// Issued-at (whole seconds since epoch), informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiry as a NumericDate: seconds since epoch, millisecond precision
    pub exp: f64,
}

impl Claims {
    /// Expiry in whole milliseconds since the epoch.
    pub fn expires_at_millis(&self) -> i64 {
        (self.exp * 1000.0).round() as i64
    }

    /// Expiry as a `SystemTime`.
    pub fn expires_at(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(self.expires_at_millis().max(0) as u64)
    }
}
