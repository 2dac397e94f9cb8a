mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{parse_body, AuthHeaders, TestApp, TEST_JWT_SECRET};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Registers one student and one teacher, returns (student_id, teacher_id).
async fn seed_pair(app: &TestApp, tag: &str) -> (i64, i64) {
    let student = app.register("Student", &format!("student-{}@test.com", tag), "pw1", "STUDENT").await;
    let teacher = app.register("Teacher", &format!("teacher-{}@test.com", tag), "pw1", "TEACHER").await;

    (
        student["id"].as_i64().unwrap(),
        teacher["teacherId"].as_i64().unwrap(),
    )
}

async fn book(app: &TestApp, auth: &AuthHeaders, payload: Value) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/lessons")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_schedule_lesson_success() {
    let app = TestApp::new().await;
    let (student_id, teacher_id) = seed_pair(&app, "s1").await;
    let auth = app.login("student-s1@test.com", "pw1").await;

    let res = book(&app, &auth, json!({
        "studentId": student_id,
        "teacherId": teacher_id,
        "dateTime": "2025-06-15T14:30:00",
        "modality": "ONLINE"
    })).await;

    assert_eq!(res.status(), StatusCode::CREATED);

    let location = res.headers().get(header::LOCATION)
        .expect("No Location header")
        .to_str().unwrap().to_string();

    let body = parse_body(res).await;
    let id = body["id"].as_i64().unwrap();
    assert!(id > 0);
    assert_eq!(location, format!("/api/lessons/{}", id));
    assert_eq!(body["studentId"], student_id);
    assert_eq!(body["teacherId"], teacher_id);
    assert_eq!(body["dateTime"], "2025-06-15T14:30:00");
    assert_eq!(body["modality"], "ONLINE");
}

#[tokio::test]
async fn test_schedule_lesson_unknown_teacher_is_bare_400() {
    let app = TestApp::new().await;
    let (student_id, _) = seed_pair(&app, "s2").await;
    let auth = app.login("student-s2@test.com", "pw1").await;

    let res = book(&app, &auth, json!({
        "studentId": student_id,
        "teacherId": 9999,
        "dateTime": "2025-06-15T14:30:00",
        "modality": "ONLINE"
    })).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty(), "400 for a dangling reference must carry no body");

    // Nothing was persisted.
    let list = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/lessons/mine-as-student")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(list).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_schedule_lesson_unknown_student_is_400() {
    let app = TestApp::new().await;
    let (_, teacher_id) = seed_pair(&app, "s3").await;
    let auth = app.login("student-s3@test.com", "pw1").await;

    let res = book(&app, &auth, json!({
        "studentId": 9999,
        "teacherId": teacher_id,
        "dateTime": "2025-06-15T14:30:00",
        "modality": "ONLINE"
    })).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_schedule_lesson_malformed_datetime_is_400() {
    let app = TestApp::new().await;
    let (student_id, teacher_id) = seed_pair(&app, "s4").await;
    let auth = app.login("student-s4@test.com", "pw1").await;

    let res = book(&app, &auth, json!({
        "studentId": student_id,
        "teacherId": teacher_id,
        "dateTime": "15/06/2025 14:30",
        "modality": "ONLINE"
    })).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_schedule_lesson_accepts_legacy_modality_tag() {
    let app = TestApp::new().await;
    let (student_id, teacher_id) = seed_pair(&app, "s5").await;
    let auth = app.login("student-s5@test.com", "pw1").await;

    let res = book(&app, &auth, json!({
        "studentId": student_id,
        "teacherId": teacher_id,
        "dateTime": "2025-06-15T14:30:00",
        "modality": "PRESENCIAL"
    })).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["modality"], "IN_PERSON");
}

#[tokio::test]
async fn test_schedule_lesson_requires_student_role() {
    let app = TestApp::new().await;
    let (student_id, teacher_id) = seed_pair(&app, "s6").await;
    let auth = app.login("teacher-s6@test.com", "pw1").await;

    let res = book(&app, &auth, json!({
        "studentId": student_id,
        "teacherId": teacher_id,
        "dateTime": "2025-06-15T14:30:00",
        "modality": "ONLINE"
    })).await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_schedule_lesson_requires_auth() {
    let app = TestApp::new().await;
    let (student_id, teacher_id) = seed_pair(&app, "s7").await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/lessons")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "studentId": student_id,
                "teacherId": teacher_id,
                "dateTime": "2025-06-15T14:30:00",
                "modality": "ONLINE"
            }).to_string()))
            .unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_schedule_lesson_requires_csrf_header() {
    let app = TestApp::new().await;
    let (student_id, teacher_id) = seed_pair(&app, "s8").await;
    let auth = app.login("student-s8@test.com", "pw1").await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/lessons")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "studentId": student_id,
                "teacherId": teacher_id,
                "dateTime": "2025-06-15T14:30:00",
                "modality": "ONLINE"
            }).to_string()))
            .unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_mine_as_student_lists_only_own_lessons() {
    let app = TestApp::new().await;
    let (student_id, teacher_id) = seed_pair(&app, "s9").await;
    let other = app.register("Other", "other-s9@test.com", "pw1", "STUDENT").await;
    let other_id = other["id"].as_i64().unwrap();

    let auth = app.login("student-s9@test.com", "pw1").await;
    let other_auth = app.login("other-s9@test.com", "pw1").await;

    for time in ["2025-06-15T14:30:00", "2025-06-16T10:00:00"] {
        let res = book(&app, &auth, json!({
            "studentId": student_id,
            "teacherId": teacher_id,
            "dateTime": time,
            "modality": "ONLINE"
        })).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = book(&app, &other_auth, json!({
        "studentId": other_id,
        "teacherId": teacher_id,
        "dateTime": "2025-06-17T09:00:00",
        "modality": "ONLINE"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let list_res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/lessons/mine-as-student")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();

    assert_eq!(list_res.status(), StatusCode::OK);
    let list = parse_body(list_res).await;
    let lessons = list.as_array().unwrap();
    assert_eq!(lessons.len(), 2);
    assert!(lessons.iter().all(|l| l["studentId"] == student_id));
}

#[tokio::test]
async fn test_mine_as_teacher_lists_lessons() {
    let app = TestApp::new().await;
    let (student_id, teacher_id) = seed_pair(&app, "s10").await;
    let auth = app.login("student-s10@test.com", "pw1").await;

    let res = book(&app, &auth, json!({
        "studentId": student_id,
        "teacherId": teacher_id,
        "dateTime": "2025-06-15T14:30:00",
        "modality": "IN_PERSON"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let teacher_auth = app.login("teacher-s10@test.com", "pw1").await;
    let list_res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/lessons/mine-as-teacher")
            .header(header::COOKIE, format!("access_token={}", teacher_auth.access_token))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();

    assert_eq!(list_res.status(), StatusCode::OK);
    let list = parse_body(list_res).await;
    let lessons = list.as_array().unwrap();
    assert_eq!(lessons.len(), 1);
    assert_eq!(lessons[0]["teacherId"], teacher_id);
}

#[tokio::test]
async fn test_mine_as_teacher_without_linked_record_is_404() {
    let app = TestApp::new().await;
    let teacher = app.register("Teacher", "teacher-s11@test.com", "pw1", "TEACHER").await;
    let teacher_id = teacher["teacherId"].as_i64().unwrap();

    sqlx::query("DELETE FROM teachers WHERE id = ?")
        .bind(teacher_id)
        .execute(&app.pool)
        .await
        .unwrap();

    let auth = app.login("teacher-s11@test.com", "pw1").await;
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/lessons/mine-as-teacher")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mine_as_student_with_unresolvable_identity_is_401() {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use scheduling_backend::domain::models::{auth::Claims, user::Role};
    use chrono::{Duration, Utc};

    let app = TestApp::new().await;

    // A validly signed token whose subject matches no stored user.
    let now = Utc::now();
    let claims = Claims {
        iss: "test-issuer".to_string(),
        sub: "ghost@test.com".to_string(),
        aud: "scheduling-frontend".to_string(),
        exp: (now + Duration::minutes(15)).timestamp() as usize,
        iat: now.timestamp() as usize,
        jti: "test-jti".to_string(),
        role: Role::Student,
        csrf_token: "csrf".to_string(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    ).unwrap();

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/lessons/mine-as-student")
            .header(header::COOKIE, format!("access_token={}", token))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_lesson_by_id() {
    let app = TestApp::new().await;
    let (student_id, teacher_id) = seed_pair(&app, "s12").await;
    let auth = app.login("student-s12@test.com", "pw1").await;

    let res = book(&app, &auth, json!({
        "studentId": student_id,
        "teacherId": teacher_id,
        "dateTime": "2025-06-15T14:30:00",
        "modality": "ONLINE"
    })).await;
    let created = parse_body(res).await;
    let id = created["id"].as_i64().unwrap();

    let get_res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!("/api/lessons/{}", id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();

    assert_eq!(get_res.status(), StatusCode::OK);
    let body = parse_body(get_res).await;
    assert_eq!(body["id"], id);

    let missing_res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/lessons/424242")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();

    assert_eq!(missing_res.status(), StatusCode::NOT_FOUND);
}
