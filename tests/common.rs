use scheduling_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    domain::services::auth_service::AuthService,
    domain::services::lesson_service::LessonService,
    domain::services::user_service::UserService,
    infra::repositories::{
        sqlite_auth_repo::SqliteAuthRepo,
        sqlite_lesson_repo::SqliteLessonRepo,
        sqlite_teacher_repo::SqliteTeacherRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    Router,
};
use tower::ServiceExt;
use serde_json::{json, Value};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub struct AuthHeaders {
    pub access_token: String,
    pub refresh_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: TEST_JWT_SECRET.to_string(),
            auth_issuer: "test-issuer".to_string(),
        };

        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
        let teacher_repo = Arc::new(SqliteTeacherRepo::new(pool.clone()));
        let lesson_repo = Arc::new(SqliteLessonRepo::new(pool.clone()));
        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));

        let lesson_service = Arc::new(LessonService::new(
            user_repo.clone(),
            teacher_repo.clone(),
            lesson_repo.clone(),
        ));
        let user_service = Arc::new(UserService::new(user_repo.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        let state = Arc::new(AppState {
            config: config.clone(),
            user_repo,
            teacher_repo,
            lesson_repo,
            auth_repo,
            lesson_service,
            user_service,
            auth_service,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// POST /api/users and return the created-user body.
    pub async fn register(&self, name: &str, email: &str, password: &str, role: &str) -> Value {
        let payload = json!({
            "name": name,
            "email": email,
            "password": password,
            "role": role
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Registration failed in test helper: status {}", response.status());
        }

        parse_body(response).await
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthHeaders {
        let payload = json!({
            "email": email,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token = extract_cookie(&cookies, "access_token");
        let refresh_token = extract_cookie(&cookies, "refresh_token");

        let body_json = parse_body(response).await;
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            refresh_token,
            csrf_token,
        }
    }
}

fn extract_cookie(cookies: &[String], name: &str) -> String {
    let prefix = format!("{}=", name);
    let cookie = cookies.iter()
        .find(|c| c.starts_with(&prefix))
        .unwrap_or_else(|| panic!("No {} cookie returned", name));

    let start = prefix.len();
    let end = cookie[start..].find(';').unwrap_or(cookie.len() - start);
    cookie[start..start + end].to_string()
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
