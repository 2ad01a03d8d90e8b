use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::extractors::CurrentUser;

#[derive(Debug, Serialize)]
struct HomeResponse {
    message: String,
}

async fn home(user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(HomeResponse {
        message: format!("Welcome back, {}", user.identity),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/home", web::get().to(home));
}
