use serde::Deserialize;

use crate::domain::models::lesson::Modality;
use crate::domain::models::user::Role;

/// `dateTime` stays a raw string here; the handler parses it so a
/// malformed timestamp is rejected before any lookup happens.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleLessonRequest {
    pub student_id: i64,
    pub teacher_id: i64,
    pub date_time: String,
    pub modality: Modality,
}

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Full replacement set — no field is optional on this endpoint.
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
