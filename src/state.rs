use std::sync::Arc;
use crate::domain::ports::{AuthRepository, LessonRepository, TeacherRepository, UserRepository};
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::lesson_service::LessonService;
use crate::domain::services::user_service::UserService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub teacher_repo: Arc<dyn TeacherRepository>,
    pub lesson_repo: Arc<dyn LessonRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub lesson_service: Arc<LessonService>,
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
}
