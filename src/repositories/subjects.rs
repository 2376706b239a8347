use time::PrimitiveDateTime;

use crate::db::models::Subject;

const COLUMNS: &str = "id, course_id, name, created_at";

#[derive(Debug, Clone)]
pub(crate) struct NewSubject {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) name: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn list_by_course(
    executor: impl sqlx::PgExecutor<'_>,
    course_id: &str,
) -> Result<Vec<Subject>, sqlx::Error> {
    sqlx::query_as::<_, Subject>(&format!(
        "SELECT {COLUMNS} FROM subjects WHERE course_id = $1 ORDER BY created_at, id"
    ))
    .bind(course_id)
    .fetch_all(executor)
    .await
}

pub(crate) async fn insert_many(
    executor: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    rows: &[NewSubject],
) -> Result<Vec<Subject>, sqlx::Error> {
    let mut inserted = Vec::with_capacity(rows.len());
    for row in rows {
        let subject = sqlx::query_as::<_, Subject>(&format!(
            "INSERT INTO subjects (id, course_id, name, created_at)
             VALUES ($1,$2,$3,$4)
             RETURNING {COLUMNS}"
        ))
        .bind(&row.id)
        .bind(&row.course_id)
        .bind(row.name.as_deref())
        .bind(row.created_at)
        .fetch_one(&mut **executor)
        .await?;
        inserted.push(subject);
    }
    Ok(inserted)
}
