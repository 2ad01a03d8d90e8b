use std::time::SystemTime;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::{read_credential, HeaderCredential};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Caller identity decoded from the request credential.
///
/// The gate has already rejected bad credentials on protected paths; this
/// extractor decodes the same header again so handlers get the claims
/// without the gate having to mutate the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub identity: String,
    pub expires_at: SystemTime,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<CurrentUser, AppError> {
    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    let token = match read_credential(req.headers().get(header::AUTHORIZATION)) {
        HeaderCredential::Token(token) => token,
        HeaderCredential::Absent => return Err(AppError::missing_credential()),
        HeaderCredential::Unreadable => return Err(AppError::invalid_or_expired_credential()),
    };

    let claims = app_state.tokens.validate(token)?;

    Ok(CurrentUser {
        expires_at: claims.expires_at(),
        identity: claims.identity,
    })
}
