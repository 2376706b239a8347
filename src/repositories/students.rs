use time::PrimitiveDateTime;

use crate::db::models::Student;

const COLUMNS: &str = "id, course_id, first_name, last_name, email, cel, document, created_at";

#[derive(Debug, Clone)]
pub(crate) struct NewStudent {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) first_name: String,
    pub(crate) last_name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) cel: Option<String>,
    pub(crate) document: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn list_by_course(
    executor: impl sqlx::PgExecutor<'_>,
    course_id: &str,
) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!(
        "SELECT {COLUMNS} FROM students WHERE course_id = $1 ORDER BY created_at, id"
    ))
    .bind(course_id)
    .fetch_all(executor)
    .await
}

pub(crate) async fn insert_many(
    executor: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    rows: &[NewStudent],
) -> Result<Vec<Student>, sqlx::Error> {
    let mut inserted = Vec::with_capacity(rows.len());
    for row in rows {
        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (
                id, course_id, first_name, last_name, email, cel, document, created_at
             ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
             RETURNING {COLUMNS}"
        ))
        .bind(&row.id)
        .bind(&row.course_id)
        .bind(&row.first_name)
        .bind(row.last_name.as_deref())
        .bind(row.email.as_deref())
        .bind(row.cel.as_deref())
        .bind(row.document.as_deref())
        .bind(row.created_at)
        .fetch_one(&mut **executor)
        .await?;
        inserted.push(student);
    }
    Ok(inserted)
}
