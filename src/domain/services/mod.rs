pub mod auth_service;
pub mod lesson_service;
pub mod user_service;
