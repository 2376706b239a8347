use time::{Date, PrimitiveDateTime};

use crate::db::models::Evaluation;

const COLUMNS: &str = "\
    id, course_id, name, date, category, grade_scale_id, subject_id, evaluation_type_id, \
    approval_grade, qualification_grade, grades_sent_by_email, custom_message, created_at";

#[derive(Debug, Clone)]
pub(crate) struct NewEvaluation {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) name: String,
    pub(crate) date: Date,
    pub(crate) category: String,
    pub(crate) grade_scale_id: Option<String>,
    pub(crate) subject_id: Option<String>,
    pub(crate) evaluation_type_id: Option<String>,
    pub(crate) approval_grade: Option<f64>,
    pub(crate) qualification_grade: Option<f64>,
    pub(crate) grades_sent_by_email: bool,
    pub(crate) custom_message: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn list_by_course(
    executor: impl sqlx::PgExecutor<'_>,
    course_id: &str,
) -> Result<Vec<Evaluation>, sqlx::Error> {
    sqlx::query_as::<_, Evaluation>(&format!(
        "SELECT {COLUMNS} FROM evaluations WHERE course_id = $1 ORDER BY created_at, id"
    ))
    .bind(course_id)
    .fetch_all(executor)
    .await
}

pub(crate) async fn insert_many(
    executor: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    rows: &[NewEvaluation],
) -> Result<Vec<Evaluation>, sqlx::Error> {
    let mut inserted = Vec::with_capacity(rows.len());
    for row in rows {
        let evaluation = sqlx::query_as::<_, Evaluation>(&format!(
            "INSERT INTO evaluations (
                id, course_id, name, date, category, grade_scale_id, subject_id,
                evaluation_type_id, approval_grade, qualification_grade, grades_sent_by_email,
                custom_message, created_at
             ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13)
             RETURNING {COLUMNS}"
        ))
        .bind(&row.id)
        .bind(&row.course_id)
        .bind(&row.name)
        .bind(row.date)
        .bind(&row.category)
        .bind(row.grade_scale_id.as_deref())
        .bind(row.subject_id.as_deref())
        .bind(row.evaluation_type_id.as_deref())
        .bind(row.approval_grade)
        .bind(row.qualification_grade)
        .bind(row.grades_sent_by_email)
        .bind(row.custom_message.as_deref())
        .bind(row.created_at)
        .fetch_one(&mut **executor)
        .await?;
        inserted.push(evaluation);
    }
    Ok(inserted)
}
