use actix_web::{web, HttpResponse};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::routes::ApiResponse;
use crate::services::posts::NewPost;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct CreatedPost {
    id: Uuid,
    #[serde(rename = "type")]
    kind: String,
    title: String,
    file_url: Option<String>,
}

async fn create_post(
    user: CurrentUser,
    body: web::Json<NewPost>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let post = app_state
        .posts
        .create_post(body.into_inner(), &user.identity)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Post created successfully",
        CreatedPost {
            id: post.post_id,
            kind: post.kind,
            title: post.title,
            file_url: post.file_url,
        },
    )))
}

async fn posts_by_user(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ApiResponse::data(
        app_state.posts.posts_by(&user.identity),
    )))
}

async fn list_posts(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ApiResponse::data(app_state.posts.list())))
}

async fn post_comments(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let comments = app_state.posts.comments_for(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(comments)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_posts))
        .route("/", web::get().to(list_posts))
        .route("/create", web::post().to(create_post))
        .route("/by-user", web::get().to(posts_by_user))
        .route("/{post_id}/comments", web::get().to(post_comments));
}
