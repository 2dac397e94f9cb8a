use axum::{extract::{State, Path}, response::IntoResponse, Json, http::{header, StatusCode}};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::ScheduleLessonRequest;
use crate::domain::models::user::Role;
use crate::error::AppError;
use std::sync::Arc;
use chrono::NaiveDateTime;

pub async fn schedule_lesson(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    Json(payload): Json<ScheduleLessonRequest>,
) -> Result<impl IntoResponse, AppError> {
    if principal.role != Role::Student {
        return Err(AppError::Forbidden("Only students can book lessons".into()));
    }

    // Parsed before any lookup so a malformed timestamp never reaches
    // the reference checks.
    let date_time: NaiveDateTime = payload.date_time.parse()
        .map_err(|_| AppError::Validation(
            "Invalid dateTime format (expected ISO-8601, e.g. 2025-06-15T14:30:00)".into()
        ))?;

    let lesson = state.lesson_service
        .schedule_lesson(payload.student_id, payload.teacher_id, date_time, payload.modality)
        .await?;

    let location = format!("/api/lessons/{}", lesson.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(lesson)))
}

pub async fn list_my_lessons_as_student(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    if principal.role != Role::Student {
        return Err(AppError::Forbidden("Student access only".into()));
    }

    let user = state.user_repo.find_by_email(&principal.email).await?
        .ok_or(AppError::Unauthorized)?;

    let lessons = state.lesson_service.find_by_student(user.id).await?;
    Ok(Json(lessons))
}

pub async fn list_my_lessons_as_teacher(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    if principal.role != Role::Teacher {
        return Err(AppError::Forbidden("Teacher access only".into()));
    }

    let user = state.user_repo.find_by_email(&principal.email).await?
        .ok_or(AppError::Unauthorized)?;

    let teacher = state.teacher_repo.find_by_user_id(user.id).await?
        .ok_or(AppError::NotFound("No teacher record linked to this account".into()))?;

    let lessons = state.lesson_service.find_by_teacher(teacher.id).await?;
    Ok(Json(lessons))
}

pub async fn get_lesson(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let lesson = state.lesson_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Lesson not found".into()))?;
    Ok(Json(lesson))
}
