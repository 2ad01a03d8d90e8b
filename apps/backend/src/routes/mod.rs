use actix_web::error::JsonPayloadError;
use actix_web::{web, HttpRequest};
use serde::Serialize;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod comments;
pub mod health;
pub mod home;
pub mod posts;
pub mod users;

/// Success envelope shared by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: &'static str, data: T) -> Self {
        Self {
            status: "success",
            message: Some(message),
            data,
        }
    }

    pub fn data(data: T) -> Self {
        Self {
            status: "success",
            message: None,
            data,
        }
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(
        ErrorCode::InvalidBody,
        format!("Invalid request body: {err}"),
    )
    .into()
}

/// Register every route. Authentication is not applied here; wrap the
/// `App` in `AuthGate` to protect non-exempt paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));

    cfg.configure(health::configure_routes)
        .configure(home::configure_routes);

    cfg.service(web::scope("/api/v1/users").configure(users::configure_routes))
        .service(web::scope("/api/v1/posts").configure(posts::configure_routes))
        .service(web::scope("/api/v1/comments").configure(comments::configure_routes));
}
