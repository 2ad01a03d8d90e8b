use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::auth::claims::Claims;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Why a presented credential was not accepted.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    /// Signature verified but `exp <= now`.
    #[error("credential has expired")]
    Expired,
    /// Bad signature, corrupt encoding, wrong algorithm or missing claims.
    #[error("credential is malformed")]
    Malformed,
}

/// Mint an HS256 access token for `identity` valid for `ttl` from `now`.
///
/// `exp` is a fractional NumericDate with millisecond precision: `now` is
/// truncated to the millisecond and `ttl` to whole milliseconds, so a token
/// is valid right after minting and expired from `now + ttl` on. `ttl` must
/// be at least one millisecond.
pub fn mint_access_token(
    identity: &str,
    ttl: Duration,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let now_ms = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_millis();
    let now_ms = i64::try_from(now_ms).unwrap_or(i64::MAX);

    let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
    if ttl_ms < 1 {
        return Err(AppError::internal(format!(
            "Credential lifetime must be at least 1ms (got {ttl:?})"
        )));
    }

    let claims = Claims {
        identity: identity.to_string(),
        iat: Some(now_ms / 1000),
        exp: now_ms.saturating_add(ttl_ms) as f64 / 1000.0,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a token's signature and decode its claims, judging expiry at `now`.
///
/// The library's own expiry check is disabled (it reads the process clock,
/// works in whole seconds and applies leeway); expiry is strict at
/// millisecond precision: `exp <= now` is expired.
pub fn verify_access_token(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<Claims, CredentialError> {
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;
    validation.set_required_spec_claims(&["exp"]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => CredentialError::Expired,
        _ => CredentialError::Malformed,
    })?;

    if !claims.exp.is_finite() {
        return Err(CredentialError::Malformed);
    }

    if claims.expires_at_millis() <= unix_millis(now) {
        return Err(CredentialError::Expired);
    }

    Ok(claims)
}

fn unix_millis(t: SystemTime) -> i64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_millis()).unwrap_or(i64::MAX),
        Err(before) => -i64::try_from(before.duration().as_millis()).unwrap_or(i64::MAX),
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde_json::json;

    use super::{mint_access_token, verify_access_token, CredentialError};
    use crate::state::security_config::SecurityConfig;

    const HOUR: Duration = Duration::from_secs(3600);

    fn security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    #[test]
    fn test_mint_and_verify_roundtrip() {
        let security = security();
        let now = SystemTime::now();

        let token = mint_access_token("a@mail.com", HOUR, now, &security).unwrap();
        let claims = verify_access_token(&token, now, &security).unwrap();

        let now_ms = now.duration_since(UNIX_EPOCH).unwrap().as_millis() as i64;
        assert_eq!(claims.identity, "a@mail.com");
        assert_eq!(claims.iat, Some(now_ms / 1000));
        assert_eq!(claims.expires_at_millis(), now_ms + 3_600_000);
    }

    #[test]
    fn test_token_without_iat_is_accepted() {
        let security = security();
        let now = SystemTime::now();
        let exp = now.duration_since(UNIX_EPOCH).unwrap().as_secs() + 3600;

        let token = encode(
            &Header::new(Algorithm::HS256),
            &json!({ "email": "a@mail.com", "exp": exp }),
            &EncodingKey::from_secret(&security.jwt_secret),
        )
        .unwrap();

        let claims = verify_access_token(&token, now, &security).unwrap();
        assert_eq!(claims.identity, "a@mail.com");
        assert_eq!(claims.iat, None);
    }

    #[test]
    fn test_sub_second_ttl_is_honoured() {
        let security = security();
        let issued = UNIX_EPOCH + Duration::from_millis(1_700_000_000_250);
        let ttl = Duration::from_millis(500);

        let token = mint_access_token("a@mail.com", ttl, issued, &security).unwrap();

        assert!(verify_access_token(&token, issued, &security).is_ok());
        assert!(verify_access_token(&token, issued + ttl - Duration::from_millis(1), &security).is_ok());
        assert_eq!(
            verify_access_token(&token, issued + ttl, &security),
            Err(CredentialError::Expired)
        );
    }

    #[test]
    fn test_one_second_ttl_late_in_the_second() {
        let security = security();
        let issued = UNIX_EPOCH + Duration::from_millis(1_700_000_000_900);

        let token =
            mint_access_token("a@mail.com", Duration::from_secs(1), issued, &security).unwrap();

        assert!(verify_access_token(&token, issued + Duration::from_millis(200), &security).is_ok());
        assert_eq!(
            verify_access_token(&token, issued + Duration::from_secs(1), &security),
            Err(CredentialError::Expired)
        );
    }

    #[test]
    fn test_ttl_under_a_millisecond_is_rejected() {
        let err = mint_access_token(
            "a@mail.com",
            Duration::from_micros(999),
            SystemTime::now(),
            &security(),
        )
        .unwrap_err();
        assert_eq!(err.code(), crate::errors::ErrorCode::Internal);
    }

    #[test]
    fn test_expiry_is_strict_at_boundary() {
        let security = security();
        let issued = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let token = mint_access_token("a@mail.com", HOUR, issued, &security).unwrap();

        let just_before = issued + HOUR - Duration::from_secs(1);
        assert!(verify_access_token(&token, just_before, &security).is_ok());

        let at_expiry = issued + HOUR;
        assert_eq!(
            verify_access_token(&token, at_expiry, &security),
            Err(CredentialError::Expired)
        );
    }

    #[test]
    fn test_bad_signature() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let security_b = SecurityConfig::new("secret-B".as_bytes());
        let now = SystemTime::now();

        let token = mint_access_token("a@mail.com", HOUR, now, &security_a).unwrap();

        assert_eq!(
            verify_access_token(&token, now, &security_b),
            Err(CredentialError::Malformed)
        );
    }

    #[test]
    fn test_expired_token_with_bad_signature_is_malformed() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let security_b = SecurityConfig::new("secret-B".as_bytes());
        let issued = UNIX_EPOCH + Duration::from_secs(1_700_000_000);

        let token = mint_access_token("a@mail.com", HOUR, issued, &security_a).unwrap();

        assert_eq!(
            verify_access_token(&token, issued + HOUR * 2, &security_b),
            Err(CredentialError::Malformed)
        );
    }

    #[test]
    fn test_missing_identity_claim() {
        let security = security();
        let now = SystemTime::now();
        let exp = now.duration_since(UNIX_EPOCH).unwrap().as_secs() + 3600;

        let token = encode(
            &Header::new(Algorithm::HS256),
            &json!({ "exp": exp, "iat": exp - 3600 }),
            &EncodingKey::from_secret(&security.jwt_secret),
        )
        .unwrap();

        assert_eq!(
            verify_access_token(&token, now, &security),
            Err(CredentialError::Malformed)
        );
    }

    #[test]
    fn test_missing_exp_claim() {
        let security = security();
        let now = SystemTime::now();

        let token = encode(
            &Header::new(Algorithm::HS256),
            &json!({ "email": "a@mail.com", "iat": 0 }),
            &EncodingKey::from_secret(&security.jwt_secret),
        )
        .unwrap();

        assert_eq!(
            verify_access_token(&token, now, &security),
            Err(CredentialError::Malformed)
        );
    }

    #[test]
    fn test_algorithm_is_pinned() {
        let security = security();
        let now = SystemTime::now();
        let exp = now.duration_since(UNIX_EPOCH).unwrap().as_secs() + 3600;

        let token = encode(
            &Header::new(Algorithm::HS512),
            &json!({ "email": "a@mail.com", "iat": exp - 3600, "exp": exp }),
            &EncodingKey::from_secret(&security.jwt_secret),
        )
        .unwrap();

        assert_eq!(
            verify_access_token(&token, now, &security),
            Err(CredentialError::Malformed)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let security = security();
        for garbage in ["", "abc", "a.b.c", "Bearer xyz", "eyJhbGciOiJIUzI1NiJ9.e30."] {
            assert_eq!(
                verify_access_token(garbage, SystemTime::now(), &security),
                Err(CredentialError::Malformed),
                "input {garbage:?}"
            );
        }
    }
}
