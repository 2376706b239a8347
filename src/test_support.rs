use std::sync::{Arc, OnceLock};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    Router,
};
use sqlx::PgPool;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::api;
use crate::core::{config::Settings, security, state::AppState, time::primitive_now_utc};
use crate::db::models::{Course, Professor};
use crate::db::types::ProfessorRole;
use crate::repositories;

const TEST_SECRET_KEY: &str = "test-secret";
const TEST_DATABASE_ENV: &str = "DOCENTE_TEST_DATABASE_URL";

const CONFIG_ENV_VARS: &[&str] = &[
    "DOCENTE_HOST",
    "DOCENTE_PORT",
    "DOCENTE_ENV",
    "ENVIRONMENT",
    "DOCENTE_STRICT_CONFIG",
    "PROJECT_NAME",
    "VERSION",
    "API_V1_STR",
    "SECRET_KEY",
    "ACCESS_TOKEN_EXPIRE_MINUTES",
    "ALGORITHM",
    "BACKEND_CORS_ORIGINS",
    "POSTGRES_SERVER",
    "POSTGRES_PORT",
    "POSTGRES_USER",
    "POSTGRES_PASSWORD",
    "POSTGRES_DB",
    "DATABASE_URL",
    "DB_MAX_CONNECTIONS",
    "DOCENTE_LOG_LEVEL",
    "DOCENTE_LOG_JSON",
    "PROMETHEUS_ENABLED",
];

pub(crate) struct TestContext {
    pub(crate) state: AppState,
    pub(crate) app: Router,
    _guard: OwnedMutexGuard<()>,
}

pub(crate) async fn env_lock() -> OwnedMutexGuard<()> {
    static LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();
    let lock = LOCK.get_or_init(|| Arc::new(Mutex::new(()))).clone();
    lock.lock_owned().await
}

/// Removes every variable `Settings::load` reads so each test starts from defaults.
pub(crate) fn clear_config_env() {
    for key in CONFIG_ENV_VARS {
        std::env::remove_var(key);
    }
}

/// Database-backed context, or `None` when no test database is configured.
pub(crate) async fn setup_test_context() -> Option<TestContext> {
    let database_url = std::env::var(TEST_DATABASE_ENV).ok()?;
    let guard = env_lock().await;

    clear_config_env();
    std::env::set_var("DOCENTE_ENV", "test");
    std::env::set_var("SECRET_KEY", TEST_SECRET_KEY);
    std::env::set_var("DATABASE_URL", &database_url);

    let settings = Settings::load().expect("settings");
    let db = crate::db::init_pool(&settings).await.expect("db pool");
    crate::db::run_migrations(&db).await.expect("migrations");
    reset_db(&db).await.expect("reset db");

    let state = AppState::new(settings, db);
    let app = api::router::router(state.clone());

    Some(TestContext { state, app, _guard: guard })
}

pub(crate) async fn reset_db(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Left behind when the rollback test panics before cleaning up.
    sqlx::query("DROP TRIGGER IF EXISTS reject_evaluation_insert ON evaluations")
        .execute(pool)
        .await?;
    sqlx::query(
        "TRUNCATE grades, course_schedules, evaluations, evaluation_types, students, subjects, \
         grade_scales, courses, professors RESTART IDENTITY CASCADE",
    )
    .execute(pool)
    .await?;
    Ok(())
}

pub(crate) async fn insert_professor(
    pool: &PgPool,
    email: &str,
    role: ProfessorRole,
) -> Professor {
    repositories::professors::create(
        pool,
        repositories::professors::CreateProfessor {
            id: &Uuid::new_v4().to_string(),
            email,
            full_name: "Test Professor",
            role,
            is_active: true,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .expect("insert professor")
}

pub(crate) async fn insert_course(pool: &PgPool, name: &str, professor_id: &str) -> Course {
    repositories::courses::create(
        pool,
        &repositories::courses::CreateCourse {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            school: "Instituto Superior".to_string(),
            description: Some("Evening shift".to_string()),
            professor_id: professor_id.to_string(),
            archived: false,
            archived_at: None,
            approval_grade: Some(6.0),
            qualification_grade: Some(4.0),
            created_at: primitive_now_utc(),
        },
    )
    .await
    .expect("insert course")
}

pub(crate) fn bearer_token(professor_id: &str, settings: &Settings) -> String {
    security::create_access_token(professor_id, settings, None).expect("token")
}

pub(crate) fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    if let Some(body) = body {
        let bytes = serde_json::to_vec(&body).expect("serialize body");
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .expect("request body")
    } else {
        builder.body(Body::empty()).expect("request body")
    }
}

pub(crate) async fn read_json(response: axum::response::Response<Body>) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("response body");
    serde_json::from_slice(&body).unwrap_or_else(|err| {
        let body_text = String::from_utf8_lossy(&body);
        panic!("json parse: {err}; body: {body_text}");
    })
}
