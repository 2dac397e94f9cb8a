use std::sync::Arc;
use chrono::NaiveDateTime;
use tracing::info;

use crate::domain::models::lesson::{Lesson, Modality, NewLesson};
use crate::domain::ports::{LessonRepository, TeacherRepository, UserRepository};
use crate::error::AppError;

/// Booking core: resolves both references, persists, retrieves by role.
///
/// Nothing here prevents double-booking the same teacher or student for
/// the same time slot. Adding that guarantee would need a uniqueness
/// constraint or a transactional overlap query in the lesson store.
pub struct LessonService {
    users: Arc<dyn UserRepository>,
    teachers: Arc<dyn TeacherRepository>,
    lessons: Arc<dyn LessonRepository>,
}

impl LessonService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        teachers: Arc<dyn TeacherRepository>,
        lessons: Arc<dyn LessonRepository>,
    ) -> Self {
        Self { users, teachers, lessons }
    }

    /// Both ids must resolve before anything is written; a dangling
    /// reference aborts the booking with `InvalidReference`.
    pub async fn schedule_lesson(
        &self,
        student_id: i64,
        teacher_id: i64,
        date_time: NaiveDateTime,
        modality: Modality,
    ) -> Result<Lesson, AppError> {
        if self.users.find_by_id(student_id).await?.is_none() {
            return Err(AppError::InvalidReference(format!(
                "student {} does not exist", student_id
            )));
        }

        if self.teachers.find_by_id(teacher_id).await?.is_none() {
            return Err(AppError::InvalidReference(format!(
                "teacher {} does not exist", teacher_id
            )));
        }

        let lesson = self.lessons.create(&NewLesson {
            student_id,
            teacher_id,
            date_time,
            modality,
        }).await?;

        info!(
            "Lesson scheduled: {} (student {}, teacher {}, {:?})",
            lesson.id, student_id, teacher_id, modality
        );

        Ok(lesson)
    }

    pub async fn find_by_student(&self, student_id: i64) -> Result<Vec<Lesson>, AppError> {
        self.lessons.list_by_student(student_id).await
    }

    pub async fn find_by_teacher(&self, teacher_id: i64) -> Result<Vec<Lesson>, AppError> {
        self.lessons.list_by_teacher(teacher_id).await
    }
}
