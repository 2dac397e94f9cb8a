use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::lesson_service::LessonService;
use crate::domain::services::user_service::UserService;
use crate::infra::repositories::{
    postgres_auth_repo::PostgresAuthRepo, postgres_lesson_repo::PostgresLessonRepo,
    postgres_teacher_repo::PostgresTeacherRepo, postgres_user_repo::PostgresUserRepo,
    sqlite_auth_repo::SqliteAuthRepo, sqlite_lesson_repo::SqliteLessonRepo,
    sqlite_teacher_repo::SqliteTeacherRepo, sqlite_user_repo::SqliteUserRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let user_repo = Arc::new(PostgresUserRepo::new(pool.clone()));
        let teacher_repo = Arc::new(PostgresTeacherRepo::new(pool.clone()));
        let lesson_repo = Arc::new(PostgresLessonRepo::new(pool.clone()));
        let auth_repo = Arc::new(PostgresAuthRepo::new(pool.clone()));

        build_state(config, user_repo, teacher_repo, lesson_repo, auth_repo)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
        let teacher_repo = Arc::new(SqliteTeacherRepo::new(pool.clone()));
        let lesson_repo = Arc::new(SqliteLessonRepo::new(pool.clone()));
        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));

        build_state(config, user_repo, teacher_repo, lesson_repo, auth_repo)
    }
}

fn build_state(
    config: &Config,
    user_repo: Arc<dyn crate::domain::ports::UserRepository>,
    teacher_repo: Arc<dyn crate::domain::ports::TeacherRepository>,
    lesson_repo: Arc<dyn crate::domain::ports::LessonRepository>,
    auth_repo: Arc<dyn crate::domain::ports::AuthRepository>,
) -> AppState {
    let lesson_service = Arc::new(LessonService::new(
        user_repo.clone(),
        teacher_repo.clone(),
        lesson_repo.clone(),
    ));
    let user_service = Arc::new(UserService::new(user_repo.clone()));
    let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

    AppState {
        config: config.clone(),
        user_repo,
        teacher_repo,
        lesson_repo,
        auth_repo,
        lesson_service,
        user_service,
        auth_service,
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
