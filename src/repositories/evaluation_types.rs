use time::PrimitiveDateTime;

use crate::db::models::EvaluationType;

const COLUMNS: &str = "id, course_id, name, weight, created_at";

#[derive(Debug, Clone)]
pub(crate) struct NewEvaluationType {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) name: String,
    pub(crate) weight: Option<f64>,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn list_by_course(
    executor: impl sqlx::PgExecutor<'_>,
    course_id: &str,
) -> Result<Vec<EvaluationType>, sqlx::Error> {
    sqlx::query_as::<_, EvaluationType>(&format!(
        "SELECT {COLUMNS} FROM evaluation_types WHERE course_id = $1 ORDER BY created_at, id"
    ))
    .bind(course_id)
    .fetch_all(executor)
    .await
}

pub(crate) async fn insert_many(
    executor: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    rows: &[NewEvaluationType],
) -> Result<Vec<EvaluationType>, sqlx::Error> {
    let mut inserted = Vec::with_capacity(rows.len());
    for row in rows {
        let evaluation_type = sqlx::query_as::<_, EvaluationType>(&format!(
            "INSERT INTO evaluation_types (id, course_id, name, weight, created_at)
             VALUES ($1,$2,$3,$4,$5)
             RETURNING {COLUMNS}"
        ))
        .bind(&row.id)
        .bind(&row.course_id)
        .bind(&row.name)
        .bind(row.weight)
        .bind(row.created_at)
        .fetch_one(&mut **executor)
        .await?;
        inserted.push(evaluation_type);
    }
    Ok(inserted)
}
