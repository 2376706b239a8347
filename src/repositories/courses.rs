use time::PrimitiveDateTime;

use crate::db::models::Course;

const COURSE_COLUMNS: &str = "\
    id, name, school, description, professor_id, archived, archived_at, approval_grade, \
    qualification_grade, created_at, updated_at";

#[derive(Debug, Clone)]
pub(crate) struct CreateCourse {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) school: String,
    pub(crate) description: Option<String>,
    pub(crate) professor_id: String,
    pub(crate) archived: bool,
    pub(crate) archived_at: Option<PrimitiveDateTime>,
    pub(crate) approval_grade: Option<f64>,
    pub(crate) qualification_grade: Option<f64>,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    params: &CreateCourse,
) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "INSERT INTO courses (
            id, name, school, description, professor_id, archived, archived_at,
            approval_grade, qualification_grade, created_at, updated_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$10)
         RETURNING {COURSE_COLUMNS}",
    ))
    .bind(&params.id)
    .bind(&params.name)
    .bind(&params.school)
    .bind(params.description.as_deref())
    .bind(&params.professor_id)
    .bind(params.archived)
    .bind(params.archived_at)
    .bind(params.approval_grade)
    .bind(params.qualification_grade)
    .bind(params.created_at)
    .fetch_one(executor)
    .await
}

pub(crate) async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    course_id: &str,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"))
        .bind(course_id)
        .fetch_optional(executor)
        .await
}
