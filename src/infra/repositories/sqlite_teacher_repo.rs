use crate::domain::{models::teacher::Teacher, ports::TeacherRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteTeacherRepo {
    pool: SqlitePool,
}

impl SqliteTeacherRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeacherRepository for SqliteTeacherRepo {
    async fn create(&self, user_id: i64) -> Result<Teacher, AppError> {
        sqlx::query_as::<_, Teacher>(
            "INSERT INTO teachers (user_id, created_at) VALUES (?, ?) RETURNING id, user_id, created_at",
        )
            .bind(user_id)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>, AppError> {
        sqlx::query_as::<_, Teacher>("SELECT id, user_id, created_at FROM teachers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>, AppError> {
        sqlx::query_as::<_, Teacher>("SELECT id, user_id, created_at FROM teachers WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
