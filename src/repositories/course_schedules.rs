use time::{PrimitiveDateTime, Time};

use crate::db::models::CourseSchedule;
use crate::db::types::Weekday;

const COLUMNS: &str = "id, course_id, day_of_week, start_time, end_time, subject_id, created_at";

#[derive(Debug, Clone)]
pub(crate) struct NewCourseSchedule {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) day_of_week: Weekday,
    pub(crate) start_time: Time,
    pub(crate) end_time: Time,
    pub(crate) subject_id: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn list_by_course(
    executor: impl sqlx::PgExecutor<'_>,
    course_id: &str,
) -> Result<Vec<CourseSchedule>, sqlx::Error> {
    sqlx::query_as::<_, CourseSchedule>(&format!(
        "SELECT {COLUMNS} FROM course_schedules WHERE course_id = $1 ORDER BY created_at, id"
    ))
    .bind(course_id)
    .fetch_all(executor)
    .await
}

pub(crate) async fn insert_many(
    executor: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    rows: &[NewCourseSchedule],
) -> Result<Vec<CourseSchedule>, sqlx::Error> {
    let mut inserted = Vec::with_capacity(rows.len());
    for row in rows {
        let schedule = sqlx::query_as::<_, CourseSchedule>(&format!(
            "INSERT INTO course_schedules (
                id, course_id, day_of_week, start_time, end_time, subject_id, created_at
             ) VALUES ($1,$2,$3,$4,$5,$6,$7)
             RETURNING {COLUMNS}"
        ))
        .bind(&row.id)
        .bind(&row.course_id)
        .bind(row.day_of_week)
        .bind(row.start_time)
        .bind(row.end_time)
        .bind(row.subject_id.as_deref())
        .bind(row.created_at)
        .fetch_one(&mut **executor)
        .await?;
        inserted.push(schedule);
    }
    Ok(inserted)
}
