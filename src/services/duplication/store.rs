use async_trait::async_trait;

use crate::db::models::{
    Course, CourseSchedule, Evaluation, EvaluationType, Grade, Professor, Student, Subject,
};
use crate::repositories::course_schedules::NewCourseSchedule;
use crate::repositories::courses::CreateCourse;
use crate::repositories::evaluation_types::NewEvaluationType;
use crate::repositories::evaluations::NewEvaluation;
use crate::repositories::grades::NewGrade;
use crate::repositories::students::NewStudent;
use crate::repositories::subjects::NewSubject;

/// Persistence consumed by the duplication engine. Listings return records of
/// one course in a stable order; bulk inserts return the stored rows in the
/// order they were given.
#[async_trait]
pub(crate) trait CourseStore: Send {
    async fn find_professor(&mut self, professor_id: &str)
        -> Result<Option<Professor>, sqlx::Error>;

    async fn find_course(&mut self, course_id: &str) -> Result<Option<Course>, sqlx::Error>;

    async fn create_course(&mut self, course: &CreateCourse) -> Result<Course, sqlx::Error>;

    async fn list_subjects(&mut self, course_id: &str) -> Result<Vec<Subject>, sqlx::Error>;

    async fn insert_subjects(&mut self, rows: &[NewSubject]) -> Result<Vec<Subject>, sqlx::Error>;

    async fn list_students(&mut self, course_id: &str) -> Result<Vec<Student>, sqlx::Error>;

    async fn insert_students(&mut self, rows: &[NewStudent]) -> Result<Vec<Student>, sqlx::Error>;

    async fn list_evaluation_types(
        &mut self,
        course_id: &str,
    ) -> Result<Vec<EvaluationType>, sqlx::Error>;

    async fn insert_evaluation_types(
        &mut self,
        rows: &[NewEvaluationType],
    ) -> Result<Vec<EvaluationType>, sqlx::Error>;

    async fn list_evaluations(&mut self, course_id: &str) -> Result<Vec<Evaluation>, sqlx::Error>;

    async fn insert_evaluations(
        &mut self,
        rows: &[NewEvaluation],
    ) -> Result<Vec<Evaluation>, sqlx::Error>;

    async fn list_grades(&mut self, course_id: &str) -> Result<Vec<Grade>, sqlx::Error>;

    async fn insert_grades(&mut self, rows: &[NewGrade]) -> Result<Vec<Grade>, sqlx::Error>;

    async fn list_schedules(&mut self, course_id: &str)
        -> Result<Vec<CourseSchedule>, sqlx::Error>;

    async fn insert_schedules(
        &mut self,
        rows: &[NewCourseSchedule],
    ) -> Result<Vec<CourseSchedule>, sqlx::Error>;
}
