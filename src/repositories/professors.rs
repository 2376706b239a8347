use sqlx::PgPool;

use crate::db::models::Professor;
use crate::db::types::ProfessorRole;

const COLUMNS: &str = "id, email, full_name, role, is_active, created_at, updated_at";

pub(crate) async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: &str,
) -> Result<Option<Professor>, sqlx::Error> {
    sqlx::query_as::<_, Professor>(&format!("SELECT {COLUMNS} FROM professors WHERE id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub(crate) struct CreateProfessor<'a> {
    pub(crate) id: &'a str,
    pub(crate) email: &'a str,
    pub(crate) full_name: &'a str,
    pub(crate) role: ProfessorRole,
    pub(crate) is_active: bool,
    pub(crate) created_at: time::PrimitiveDateTime,
}

// Professors are provisioned by the account service; this insert backs local
// fixtures and integration tests.
#[cfg_attr(not(test), allow(dead_code))]
pub(crate) async fn create(
    pool: &PgPool,
    params: CreateProfessor<'_>,
) -> Result<Professor, sqlx::Error> {
    sqlx::query_as::<_, Professor>(&format!(
        "INSERT INTO professors (id, email, full_name, role, is_active, created_at, updated_at)
         VALUES ($1,$2,$3,$4,$5,$6,$6)
         RETURNING {COLUMNS}"
    ))
    .bind(params.id)
    .bind(params.email)
    .bind(params.full_name)
    .bind(params.role)
    .bind(params.is_active)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}
