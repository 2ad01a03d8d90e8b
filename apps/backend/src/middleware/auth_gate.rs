//! Authentication gate
//!
//! Wraps the rest of the pipeline and decides, per request, whether it may
//! proceed:
//!
//! - `OPTIONS` pre-flight requests always pass (they carry no credentials)
//! - exempt paths always pass
//! - anything else needs a credential header that validates, otherwise the
//!   request is answered with 401 and the wrapped service is never called
//!
//! The gate keeps no per-request state and does not touch the request it
//! forwards; handlers that need the caller identity use `CurrentUser`.

use std::future::{ready, Ready};
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::http::Method;
use actix_web::{Error, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::auth::{read_credential, HeaderCredential, TokenService};
use crate::config::ExemptPaths;
use crate::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingCredential,
    InvalidOrExpiredCredential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Forward,
    Reject(RejectReason),
}

impl From<RejectReason> for AppError {
    fn from(reason: RejectReason) -> Self {
        match reason {
            RejectReason::MissingCredential => AppError::missing_credential(),
            RejectReason::InvalidOrExpiredCredential => AppError::invalid_or_expired_credential(),
        }
    }
}

/// Exempt paths plus the token service used to verify everything else.
#[derive(Debug, Clone)]
pub struct GatePolicy {
    exempt: Arc<ExemptPaths>,
    tokens: TokenService,
}

impl GatePolicy {
    pub fn new(tokens: TokenService, exempt: ExemptPaths) -> Self {
        Self {
            exempt: Arc::new(exempt),
            tokens,
        }
    }

    pub fn evaluate(
        &self,
        method: &Method,
        path: &str,
        authorization: Option<&HeaderValue>,
    ) -> GateDecision {
        if *method == Method::OPTIONS || self.exempt.is_exempt(path) {
            return GateDecision::Forward;
        }

        match read_credential(authorization) {
            HeaderCredential::Absent => GateDecision::Reject(RejectReason::MissingCredential),
            HeaderCredential::Unreadable => {
                GateDecision::Reject(RejectReason::InvalidOrExpiredCredential)
            }
            HeaderCredential::Token(token) if self.tokens.is_valid(token) => GateDecision::Forward,
            HeaderCredential::Token(_) => {
                GateDecision::Reject(RejectReason::InvalidOrExpiredCredential)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthGate {
    policy: GatePolicy,
}

impl AuthGate {
    pub fn new(tokens: TokenService, exempt: ExemptPaths) -> Self {
        Self {
            policy: GatePolicy::new(tokens, exempt),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service,
            policy: self.policy.clone(),
        }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: S,
    policy: GatePolicy,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let decision = self.policy.evaluate(
            req.method(),
            req.path(),
            req.headers().get(header::AUTHORIZATION),
        );

        match decision {
            GateDecision::Forward => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            GateDecision::Reject(reason) => Box::pin(async move {
                // Built inside the future so the trace id scope is active.
                let response = AppError::from(reason).error_response();
                Ok(req.into_response(response).map_into_right_body())
            }),
        }
    }
}
