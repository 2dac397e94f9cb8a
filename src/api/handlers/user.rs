use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{RegisterUserRequest, UpdateUserRequest};
use crate::domain::models::user::{NewUser, Role};
use crate::domain::services::user_service::UpdateUserParams;
use crate::error::AppError;
use std::sync::Arc;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2};
use rand::rngs::OsRng;
use tracing::info;

pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if state.user_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let password_hash = hash_password(&payload.password)?;

    let user = state.user_repo.create(&NewUser {
        name: payload.name,
        email: payload.email,
        password_hash,
        role: payload.role,
    }).await?;

    // A TEACHER account carries its linked teacher record from day one.
    let teacher_id = if user.role == Role::Teacher {
        Some(state.teacher_repo.create(user.id).await?.id)
    } else {
        None
    };

    info!("Registered user: {} ({:?})", user.id, user.role);

    Ok((StatusCode::CREATED, Json(serde_json::json!({
        "id": user.id,
        "name": user.name,
        "email": user.email,
        "role": user.role,
        "teacherId": teacher_id,
        "createdAt": user.created_at,
    }))))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let caller = state.user_repo.find_by_email(&principal.email).await?
        .ok_or(AppError::Unauthorized)?;

    if caller.id != id && caller.role != Role::Admin {
        return Err(AppError::Forbidden("Cannot update another user".into()));
    }

    let password_hash = hash_password(&payload.password)?;

    let updated = state.user_service.update_user(id, UpdateUserParams {
        name: payload.name,
        email: payload.email,
        password: password_hash,
    }).await?;

    Ok(Json(updated))
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string())
}
