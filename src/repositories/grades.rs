use time::PrimitiveDateTime;

use crate::db::models::Grade;

const COLUMNS: &str = "id, course_id, student_id, evaluation_id, grade, grade_value, created_at";

#[derive(Debug, Clone)]
pub(crate) struct NewGrade {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) student_id: String,
    pub(crate) evaluation_id: String,
    pub(crate) grade: Option<f64>,
    pub(crate) grade_value: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn list_by_course(
    executor: impl sqlx::PgExecutor<'_>,
    course_id: &str,
) -> Result<Vec<Grade>, sqlx::Error> {
    sqlx::query_as::<_, Grade>(&format!(
        "SELECT {COLUMNS} FROM grades WHERE course_id = $1 ORDER BY created_at, id"
    ))
    .bind(course_id)
    .fetch_all(executor)
    .await
}

pub(crate) async fn insert_many(
    executor: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    rows: &[NewGrade],
) -> Result<Vec<Grade>, sqlx::Error> {
    let mut inserted = Vec::with_capacity(rows.len());
    for row in rows {
        let grade = sqlx::query_as::<_, Grade>(&format!(
            "INSERT INTO grades (
                id, course_id, student_id, evaluation_id, grade, grade_value, created_at
             ) VALUES ($1,$2,$3,$4,$5,$6,$7)
             RETURNING {COLUMNS}"
        ))
        .bind(&row.id)
        .bind(&row.course_id)
        .bind(&row.student_id)
        .bind(&row.evaluation_id)
        .bind(row.grade)
        .bind(row.grade_value.as_deref())
        .bind(row.created_at)
        .fetch_one(&mut **executor)
        .await?;
        inserted.push(grade);
    }
    Ok(inserted)
}
