use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::routes::ApiResponse;
use crate::services::posts::NewComment;
use crate::state::app_state::AppState;

async fn create_comment(
    user: CurrentUser,
    body: web::Json<NewComment>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let comment = app_state
        .posts
        .add_comment(body.into_inner(), &user.identity)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Comment created successfully",
        comment,
    )))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/create", web::post().to(create_comment));
}
