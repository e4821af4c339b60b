use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;

use oba_core::UserProfile;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(session))
        .route("/auth/profile", put(update_profile))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    // Accepted but never verified; authentication security is out of
    // scope for the mock.
    #[allow(dead_code)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    #[allow(dead_code)]
    pub password: String,
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Mock login: any credentials succeed; the configured admin email
/// gets the admin flag. The profile is persisted under the fixed
/// session key.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let name = request
        .email
        .split('@')
        .next()
        .unwrap_or_default()
        .to_string();
    let profile = UserProfile {
        id: "1".to_string(),
        is_admin: request.email == state.admin_email,
        email: request.email,
        name,
        phone: None,
        created_at: Utc::now(),
    };
    state.sessions.save(&profile)?;
    Ok(Json(profile))
}

async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = UserProfile {
        id: state.ids.next_id().to_string(),
        email: request.email,
        name: request.name,
        phone: request.phone,
        is_admin: false,
        created_at: Utc::now(),
    };
    state.sessions.save(&profile)?;
    Ok(Json(profile))
}

async fn logout(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    state.sessions.clear()?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// Restore the persisted session, if any.
async fn session(
    State(state): State<AppState>,
) -> Result<Json<Option<UserProfile>>, AppError> {
    Ok(Json(state.sessions.load()?))
}

async fn update_profile(
    State(state): State<AppState>,
    Json(patch): Json<ProfilePatch>,
) -> Result<Json<UserProfile>, AppError> {
    let mut profile = state
        .sessions
        .load()?
        .ok_or_else(|| AppError::NotFoundError("No active session".to_string()))?;
    if let Some(name) = patch.name {
        profile.name = name;
    }
    if let Some(phone) = patch.phone {
        profile.phone = Some(phone);
    }
    state.sessions.save(&profile)?;
    Ok(Json(profile))
}
