use crate::domain::{models::lesson::{Lesson, NewLesson}, ports::LessonRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteLessonRepo {
    pool: SqlitePool,
}

impl SqliteLessonRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LessonRepository for SqliteLessonRepo {
    async fn create(&self, lesson: &NewLesson) -> Result<Lesson, AppError> {
        sqlx::query_as::<_, Lesson>(
            "INSERT INTO lessons (student_id, teacher_id, date_time, modality, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING *",
        )
            .bind(lesson.student_id)
            .bind(lesson.teacher_id)
            .bind(lesson.date_time)
            .bind(lesson.modality)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Lesson>, AppError> {
        sqlx::query_as::<_, Lesson>("SELECT * FROM lessons WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<Lesson>, AppError> {
        sqlx::query_as::<_, Lesson>("SELECT * FROM lessons WHERE student_id = ?")
            .bind(student_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_teacher(&self, teacher_id: i64) -> Result<Vec<Lesson>, AppError> {
        sqlx::query_as::<_, Lesson>("SELECT * FROM lessons WHERE teacher_id = ?")
            .bind(teacher_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
