//! Reading the credential out of the `Authorization` header.
//!
//! Browser clients of this API send the raw token as the header value;
//! `Bearer <token>` is accepted too.

use actix_web::http::header::HeaderValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCredential<'a> {
    /// No header, a blank value, or a scheme with no token.
    Absent,
    /// Header present but not visible ASCII.
    Unreadable,
    Token(&'a str),
}

pub fn read_credential(header: Option<&HeaderValue>) -> HeaderCredential<'_> {
    let Some(value) = header else {
        return HeaderCredential::Absent;
    };

    let Ok(raw) = value.to_str() else {
        return HeaderCredential::Unreadable;
    };

    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("bearer") {
        return HeaderCredential::Absent;
    }

    match raw.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => {
            let token = rest.trim();
            if token.is_empty() {
                HeaderCredential::Absent
            } else {
                HeaderCredential::Token(token)
            }
        }
        _ => HeaderCredential::Token(raw),
    }
}
