use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::store::CourseStore;
use crate::db::models::{
    Course, CourseSchedule, Evaluation, EvaluationType, Grade, Professor, Student, Subject,
};
use crate::repositories;
use crate::repositories::course_schedules::NewCourseSchedule;
use crate::repositories::courses::CreateCourse;
use crate::repositories::evaluation_types::NewEvaluationType;
use crate::repositories::evaluations::NewEvaluation;
use crate::repositories::grades::NewGrade;
use crate::repositories::students::NewStudent;
use crate::repositories::subjects::NewSubject;

/// Store bound to one open transaction. Nothing is visible to other
/// connections until [`PgCourseStore::commit`]; dropping the store rolls back.
pub(crate) struct PgCourseStore {
    tx: Transaction<'static, Postgres>,
}

impl PgCourseStore {
    pub(crate) async fn begin(pool: &PgPool) -> Result<Self, sqlx::Error> {
        Ok(Self { tx: pool.begin().await? })
    }

    pub(crate) async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.commit().await
    }
}

#[async_trait]
impl CourseStore for PgCourseStore {
    async fn find_professor(
        &mut self,
        professor_id: &str,
    ) -> Result<Option<Professor>, sqlx::Error> {
        repositories::professors::find_by_id(&mut *self.tx, professor_id).await
    }

    async fn find_course(&mut self, course_id: &str) -> Result<Option<Course>, sqlx::Error> {
        repositories::courses::find_by_id(&mut *self.tx, course_id).await
    }

    async fn create_course(&mut self, course: &CreateCourse) -> Result<Course, sqlx::Error> {
        repositories::courses::create(&mut *self.tx, course).await
    }

    async fn list_subjects(&mut self, course_id: &str) -> Result<Vec<Subject>, sqlx::Error> {
        repositories::subjects::list_by_course(&mut *self.tx, course_id).await
    }

    async fn insert_subjects(&mut self, rows: &[NewSubject]) -> Result<Vec<Subject>, sqlx::Error> {
        repositories::subjects::insert_many(&mut self.tx, rows).await
    }

    async fn list_students(&mut self, course_id: &str) -> Result<Vec<Student>, sqlx::Error> {
        repositories::students::list_by_course(&mut *self.tx, course_id).await
    }

    async fn insert_students(&mut self, rows: &[NewStudent]) -> Result<Vec<Student>, sqlx::Error> {
        repositories::students::insert_many(&mut self.tx, rows).await
    }

    async fn list_evaluation_types(
        &mut self,
        course_id: &str,
    ) -> Result<Vec<EvaluationType>, sqlx::Error> {
        repositories::evaluation_types::list_by_course(&mut *self.tx, course_id).await
    }

    async fn insert_evaluation_types(
        &mut self,
        rows: &[NewEvaluationType],
    ) -> Result<Vec<EvaluationType>, sqlx::Error> {
        repositories::evaluation_types::insert_many(&mut self.tx, rows).await
    }

    async fn list_evaluations(&mut self, course_id: &str) -> Result<Vec<Evaluation>, sqlx::Error> {
        repositories::evaluations::list_by_course(&mut *self.tx, course_id).await
    }

    async fn insert_evaluations(
        &mut self,
        rows: &[NewEvaluation],
    ) -> Result<Vec<Evaluation>, sqlx::Error> {
        repositories::evaluations::insert_many(&mut self.tx, rows).await
    }

    async fn list_grades(&mut self, course_id: &str) -> Result<Vec<Grade>, sqlx::Error> {
        repositories::grades::list_by_course(&mut *self.tx, course_id).await
    }

    async fn insert_grades(&mut self, rows: &[NewGrade]) -> Result<Vec<Grade>, sqlx::Error> {
        repositories::grades::insert_many(&mut self.tx, rows).await
    }

    async fn list_schedules(
        &mut self,
        course_id: &str,
    ) -> Result<Vec<CourseSchedule>, sqlx::Error> {
        repositories::course_schedules::list_by_course(&mut *self.tx, course_id).await
    }

    async fn insert_schedules(
        &mut self,
        rows: &[NewCourseSchedule],
    ) -> Result<Vec<CourseSchedule>, sqlx::Error> {
        repositories::course_schedules::insert_many(&mut self.tx, rows).await
    }
}
