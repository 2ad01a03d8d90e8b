use std::sync::Arc;
use std::time::UNIX_EPOCH;

use actix_web::error::BlockingError;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::routes::ApiResponse;
use crate::services::users::{NewUser, UserProfile};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct SignUpData {
    id: Uuid,
    email: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
struct LoginData {
    id: Uuid,
    email: String,
    token: String,
}

#[derive(Debug, Serialize)]
struct MeData {
    email: String,
    /// Credential expiry, seconds since epoch
    expires_at: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<UserProfile>,
}

fn blocking_failed(e: BlockingError) -> AppError {
    AppError::internal(format!("Blocking task failed: {e}"))
}

/// Argon2 work runs on the blocking pool, not on the request worker.
async fn sign_up(
    body: web::Json<NewUser>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let users = Arc::clone(&app_state.users);
    let new_user = body.into_inner();

    let profile = web::block(move || users.sign_up(new_user))
        .await
        .map_err(blocking_failed)??;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "User created successfully",
        SignUpData {
            id: profile.user_id,
            email: profile.email,
        },
    )))
}

async fn login(
    body: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let users = Arc::clone(&app_state.users);
    let LoginRequest { email, password } = body.into_inner();

    let profile = web::block(move || users.authenticate(&email, &password))
        .await
        .map_err(blocking_failed)??;

    let token = app_state.tokens.issue_session(&profile.email)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Login successful",
        LoginData {
            id: profile.user_id,
            email: profile.email,
            token,
        },
    )))
}

async fn list_users(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "User information retrieved successfully",
        app_state.users.list(),
    )))
}

async fn me(user: CurrentUser, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let expires_at = user
        .expires_at
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(ApiResponse::data(MeData {
        profile: app_state.users.find_by_email(&user.identity),
        email: user.identity,
        expires_at,
    })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_users))
        .route("/", web::get().to(list_users))
        .route("/sign-up", web::post().to(sign_up))
        .route("/login", web::post().to(login))
        .route("/me", web::get().to(me));
}
