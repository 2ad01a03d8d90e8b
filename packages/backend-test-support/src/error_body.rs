//! Error envelope test helpers
//!
//! Assertions for the `{status: "error", message, code}` envelope that every
//! backend error response uses. Kept free of backend types so the helpers
//! can be shared by any test binary.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderMap, HeaderName, CONTENT_TYPE};
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Local mirror of the backend's error envelope.
#[derive(Debug, Deserialize)]
pub struct ErrorBodyLike {
    pub status: String,
    pub message: String,
    pub code: String,
}

/// Assert that response parts conform to the error envelope contract.
///
/// Validates:
/// - HTTP status matches expected
/// - JSON body has `status == "error"` and the expected code
/// - `message` contains the expected text, when given
/// - 401 responses carry `WWW-Authenticate: Bearer`, other statuses do not
pub fn assert_error_body_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body_bytes: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
    expected_message_contains: Option<&str>,
) -> ErrorBodyLike {
    assert_eq!(status, expected_status);

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/json"),
        "Content-Type must be application/json (got {content_type})"
    );

    let www_auth = headers.get(HeaderName::from_static("www-authenticate"));
    if expected_status == StatusCode::UNAUTHORIZED {
        let value = www_auth.expect("401 responses must carry WWW-Authenticate");
        assert_eq!(value.to_str().unwrap(), "Bearer");
    } else {
        assert!(
            www_auth.is_none(),
            "{expected_status} responses must not carry WWW-Authenticate"
        );
    }

    let body: ErrorBodyLike =
        serde_json::from_slice(body_bytes).expect("Response body should be an error envelope");

    assert_eq!(body.status, "error");
    assert_eq!(body.code, expected_code);

    if let Some(expected) = expected_message_contains {
        assert!(
            body.message.contains(expected),
            "Expected message to contain '{}', but got '{}'",
            expected,
            body.message
        );
    }

    body
}

/// Assert that a `ServiceResponse` conforms to the error envelope contract.
pub async fn assert_error_body(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
    expected_message_contains: Option<&str>,
) -> ErrorBodyLike {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_error_body_from_parts(
        status,
        &headers,
        &body,
        expected_status,
        expected_code,
        expected_message_contains,
    )
}
