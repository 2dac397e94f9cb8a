use crate::domain::models::{
    auth::RefreshTokenRecord,
    lesson::{Lesson, NewLesson},
    teacher::Teacher,
    user::{NewUser, User},
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<User, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
}

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn create(&self, user_id: i64) -> Result<Teacher, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>, AppError>;
    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>, AppError>;
}

#[async_trait]
pub trait LessonRepository: Send + Sync {
    async fn create(&self, lesson: &NewLesson) -> Result<Lesson, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Lesson>, AppError>;
    async fn list_by_student(&self, student_id: i64) -> Result<Vec<Lesson>, AppError>;
    async fn list_by_teacher(&self, teacher_id: i64) -> Result<Vec<Lesson>, AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
}
