//! One `request_completed` event per request.
//!
//! Records method, path, status, latency, trace id, and whether an
//! `Authorization` header was sent. Header values are never logged.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{header, StatusCode};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::trace_ctx::TraceId;

pub struct AccessLog;

impl<S, B> Transform<S, ServiceRequest> for AccessLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessLogMiddleware { service }))
    }
}

pub struct AccessLogMiddleware<S> {
    service: S,
}

struct RequestLine {
    method: String,
    path: String,
    trace_id: String,
    credential_sent: bool,
    started: Instant,
}

impl RequestLine {
    fn of(req: &ServiceRequest) -> Self {
        Self {
            method: req.method().to_string(),
            path: req.path().to_string(),
            trace_id: req
                .extensions()
                .get::<TraceId>()
                .map(|id| id.0.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            credential_sent: req.headers().contains_key(header::AUTHORIZATION),
            started: Instant::now(),
        }
    }

    fn completed(&self, status: StatusCode) {
        let duration_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let status_code = status.as_u16();

        macro_rules! emit {
            ($level:ident) => {
                $level!(
                    http.method = %self.method,
                    url.path = %self.path,
                    http.status_code = status_code,
                    duration_ms,
                    trace_id = %self.trace_id,
                    credential_sent = self.credential_sent,
                    "request_completed"
                )
            };
        }

        if status.is_server_error() {
            emit!(error);
        } else if status.is_client_error() {
            emit!(warn);
        } else {
            emit!(info);
        }
    }
}

impl<S, B> Service<ServiceRequest> for AccessLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let line = RequestLine::of(&req);
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            line.completed(match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            });
            result
        })
    }
}
