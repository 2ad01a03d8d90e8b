//! Per-request trace id and tracing span.
//!
//! Each request gets a UUID v4 trace id, unless the caller already sent a
//! well-formed one in `x-trace-id`. The id is
//!
//! - stored in request extensions as [`TraceId`]
//! - set as the task-local trace id for the rest of the pipeline
//! - attached to a `request` span that instruments the downstream future
//! - echoed back in the `x-trace-id` response header
//!
//! Wrap it last so it is the outermost middleware.

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::trace_ctx::{self, TraceId, TRACE_ID_HEADER};

pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

/// Reuse an inbound trace id only if it is a UUID; anything else is replaced.
fn inbound_or_new(header: Option<&HeaderValue>) -> Uuid {
    header
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
        .unwrap_or_else(Uuid::new_v4)
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
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
        let trace_id = inbound_or_new(req.headers().get(TRACE_ID_HEADER))
            .hyphenated()
            .to_string();
        req.extensions_mut().insert(TraceId(trace_id.clone()));

        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path()
        );

        // Enter while calling so synchronous work in inner services is in the span too.
        let fut = span.in_scope(|| self.service.call(req));

        Box::pin(async move {
            let mut res = trace_ctx::with_trace_id(trace_id.clone(), fut.instrument(span)).await?;

            // A hyphenated UUID is always a valid header value.
            if let Ok(value) = HeaderValue::from_str(&trace_id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
            }

            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::HeaderValue;
    use actix_web::{test, web, App, HttpResponse};
    use uuid::Uuid;

    use super::{inbound_or_new, RequestTrace};
    use crate::trace_ctx;

    #[::core::prelude::v1::test]
    fn inbound_uuid_is_kept_and_junk_is_replaced() {
        let id = Uuid::new_v4();
        let value = HeaderValue::from_str(&id.to_string()).unwrap();
        assert_eq!(inbound_or_new(Some(&value)), id);

        let junk = HeaderValue::from_static("<script>");
        assert_ne!(inbound_or_new(Some(&junk)).to_string(), "<script>");
    }

    #[actix_web::test]
    async fn handler_sees_same_id_as_response_header() {
        let app = test::init_service(App::new().wrap(RequestTrace).route(
            "/",
            web::get().to(|| async { HttpResponse::Ok().body(trace_ctx::trace_id()) }),
        ))
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let header = resp
            .headers()
            .get("x-trace-id")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = test::read_body(resp).await;

        assert!(Uuid::parse_str(&header).is_ok());
        assert_eq!(body, header.as_bytes());
    }
}
