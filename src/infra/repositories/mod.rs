pub mod sqlite_user_repo;
pub mod sqlite_teacher_repo;
pub mod sqlite_lesson_repo;
pub mod sqlite_auth_repo;

pub mod postgres_user_repo;
pub mod postgres_teacher_repo;
pub mod postgres_lesson_repo;
pub mod postgres_auth_repo;
