//! In-process [`CourseStore`] plus record builders for exercising the
//! duplication engine without a database.

use async_trait::async_trait;
use time::{Date, Month, Time};
use uuid::Uuid;

use super::id_map::EntityKind;
use super::store::CourseStore;
use crate::core::time::primitive_now_utc;
use crate::db::models::{
    Course, CourseSchedule, Evaluation, EvaluationType, Grade, Professor, Student, Subject,
};
use crate::db::types::{ProfessorRole, Weekday};
use crate::repositories::course_schedules::NewCourseSchedule;
use crate::repositories::courses::CreateCourse;
use crate::repositories::evaluation_types::NewEvaluationType;
use crate::repositories::evaluations::NewEvaluation;
use crate::repositories::grades::NewGrade;
use crate::repositories::students::NewStudent;
use crate::repositories::subjects::NewSubject;

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pub(crate) professors: Vec<Professor>,
    pub(crate) courses: Vec<Course>,
    pub(crate) subjects: Vec<Subject>,
    pub(crate) students: Vec<Student>,
    pub(crate) evaluation_types: Vec<EvaluationType>,
    pub(crate) evaluations: Vec<Evaluation>,
    pub(crate) grades: Vec<Grade>,
    pub(crate) schedules: Vec<CourseSchedule>,
    fail_on: Option<EntityKind>,
}

fn of_course<T: Clone>(rows: &[T], course_id: &str, course_of: impl Fn(&T) -> &str) -> Vec<T> {
    rows.iter().filter(|row| course_of(row) == course_id).cloned().collect()
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes every insert of `kind` fail with a protocol error.
    pub(crate) fn fail_inserts_of(&mut self, kind: EntityKind) {
        self.fail_on = Some(kind);
    }

    fn check(&self, kind: EntityKind) -> Result<(), sqlx::Error> {
        if self.fail_on == Some(kind) {
            return Err(sqlx::Error::Protocol(format!("{} insert rejected", kind.as_str())));
        }
        Ok(())
    }

    pub(crate) fn add_professor(&mut self, professor: Professor) -> Professor {
        self.professors.push(professor.clone());
        professor
    }

    pub(crate) fn add_course(&mut self, course: Course) -> Course {
        self.courses.push(course.clone());
        course
    }

    pub(crate) fn add_subject(&mut self, course_id: &str, name: Option<&str>) -> Subject {
        let subject = Subject {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            name: name.map(str::to_string),
            created_at: primitive_now_utc(),
        };
        self.subjects.push(subject.clone());
        subject
    }

    pub(crate) fn add_student(&mut self, course_id: &str, first_name: &str) -> Student {
        let student = Student {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            first_name: first_name.to_string(),
            last_name: Some("Pérez".to_string()),
            email: Some(format!("{}@example.com", first_name.to_lowercase())),
            cel: None,
            document: Some("40111222".to_string()),
            created_at: primitive_now_utc(),
        };
        self.students.push(student.clone());
        student
    }

    pub(crate) fn add_evaluation_type(
        &mut self,
        course_id: &str,
        name: &str,
        weight: Option<f64>,
    ) -> EvaluationType {
        let evaluation_type = EvaluationType {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            name: name.to_string(),
            weight,
            created_at: primitive_now_utc(),
        };
        self.evaluation_types.push(evaluation_type.clone());
        evaluation_type
    }

    pub(crate) fn add_evaluation(
        &mut self,
        course_id: &str,
        name: &str,
        subject_id: Option<&str>,
        evaluation_type_id: Option<&str>,
    ) -> Evaluation {
        let evaluation = Evaluation {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            name: name.to_string(),
            date: Date::from_calendar_date(2026, Month::May, 12).unwrap(),
            category: "written".to_string(),
            grade_scale_id: None,
            subject_id: subject_id.map(str::to_string),
            evaluation_type_id: evaluation_type_id.map(str::to_string),
            approval_grade: Some(6.0),
            qualification_grade: None,
            grades_sent_by_email: true,
            custom_message: Some("Well done".to_string()),
            created_at: primitive_now_utc(),
        };
        self.evaluations.push(evaluation.clone());
        evaluation
    }

    pub(crate) fn add_grade(
        &mut self,
        course_id: &str,
        student_id: &str,
        evaluation_id: &str,
        grade: Option<f64>,
        grade_value: Option<&str>,
    ) -> Grade {
        let grade = Grade {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            student_id: student_id.to_string(),
            evaluation_id: evaluation_id.to_string(),
            grade,
            grade_value: grade_value.map(str::to_string),
            created_at: primitive_now_utc(),
        };
        self.grades.push(grade.clone());
        grade
    }

    pub(crate) fn add_schedule(
        &mut self,
        course_id: &str,
        day_of_week: Weekday,
        subject_id: Option<&str>,
    ) -> CourseSchedule {
        let schedule = CourseSchedule {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            day_of_week,
            start_time: Time::from_hms(8, 0, 0).unwrap(),
            end_time: Time::from_hms(9, 30, 0).unwrap(),
            subject_id: subject_id.map(str::to_string),
            created_at: primitive_now_utc(),
        };
        self.schedules.push(schedule.clone());
        schedule
    }

    pub(crate) fn subjects_of(&self, course_id: &str) -> Vec<Subject> {
        of_course(&self.subjects, course_id, |row| row.course_id.as_str())
    }

    pub(crate) fn students_of(&self, course_id: &str) -> Vec<Student> {
        of_course(&self.students, course_id, |row| row.course_id.as_str())
    }

    pub(crate) fn evaluation_types_of(&self, course_id: &str) -> Vec<EvaluationType> {
        of_course(&self.evaluation_types, course_id, |row| row.course_id.as_str())
    }

    pub(crate) fn evaluations_of(&self, course_id: &str) -> Vec<Evaluation> {
        of_course(&self.evaluations, course_id, |row| row.course_id.as_str())
    }

    pub(crate) fn grades_of(&self, course_id: &str) -> Vec<Grade> {
        of_course(&self.grades, course_id, |row| row.course_id.as_str())
    }

    pub(crate) fn schedules_of(&self, course_id: &str) -> Vec<CourseSchedule> {
        of_course(&self.schedules, course_id, |row| row.course_id.as_str())
    }
}

pub(crate) fn professor(email: &str) -> Professor {
    let now = primitive_now_utc();
    Professor {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        full_name: "Test Professor".to_string(),
        role: ProfessorRole::Professor,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn course(name: &str, professor_id: &str) -> Course {
    let now = primitive_now_utc();
    Course {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        school: "Escuela Técnica 3".to_string(),
        description: Some("Second year".to_string()),
        professor_id: professor_id.to_string(),
        archived: false,
        archived_at: None,
        approval_grade: Some(6.0),
        qualification_grade: Some(4.0),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn find_professor(
        &mut self,
        professor_id: &str,
    ) -> Result<Option<Professor>, sqlx::Error> {
        Ok(self.professors.iter().find(|professor| professor.id == professor_id).cloned())
    }

    async fn find_course(&mut self, course_id: &str) -> Result<Option<Course>, sqlx::Error> {
        Ok(self.courses.iter().find(|course| course.id == course_id).cloned())
    }

    async fn create_course(&mut self, course: &CreateCourse) -> Result<Course, sqlx::Error> {
        self.check(EntityKind::Course)?;
        let created = Course {
            id: course.id.clone(),
            name: course.name.clone(),
            school: course.school.clone(),
            description: course.description.clone(),
            professor_id: course.professor_id.clone(),
            archived: course.archived,
            archived_at: course.archived_at,
            approval_grade: course.approval_grade,
            qualification_grade: course.qualification_grade,
            created_at: course.created_at,
            updated_at: course.created_at,
        };
        Ok(self.add_course(created))
    }

    async fn list_subjects(&mut self, course_id: &str) -> Result<Vec<Subject>, sqlx::Error> {
        Ok(self.subjects_of(course_id))
    }

    async fn insert_subjects(&mut self, rows: &[NewSubject]) -> Result<Vec<Subject>, sqlx::Error> {
        self.check(EntityKind::Subject)?;
        let saved: Vec<Subject> = rows
            .iter()
            .map(|row| Subject {
                id: row.id.clone(),
                course_id: row.course_id.clone(),
                name: row.name.clone(),
                created_at: row.created_at,
            })
            .collect();
        self.subjects.extend(saved.iter().cloned());
        Ok(saved)
    }

    async fn list_students(&mut self, course_id: &str) -> Result<Vec<Student>, sqlx::Error> {
        Ok(self.students_of(course_id))
    }

    async fn insert_students(&mut self, rows: &[NewStudent]) -> Result<Vec<Student>, sqlx::Error> {
        self.check(EntityKind::Student)?;
        let saved: Vec<Student> = rows
            .iter()
            .map(|row| Student {
                id: row.id.clone(),
                course_id: row.course_id.clone(),
                first_name: row.first_name.clone(),
                last_name: row.last_name.clone(),
                email: row.email.clone(),
                cel: row.cel.clone(),
                document: row.document.clone(),
                created_at: row.created_at,
            })
            .collect();
        self.students.extend(saved.iter().cloned());
        Ok(saved)
    }

    async fn list_evaluation_types(
        &mut self,
        course_id: &str,
    ) -> Result<Vec<EvaluationType>, sqlx::Error> {
        Ok(self.evaluation_types_of(course_id))
    }

    async fn insert_evaluation_types(
        &mut self,
        rows: &[NewEvaluationType],
    ) -> Result<Vec<EvaluationType>, sqlx::Error> {
        self.check(EntityKind::EvaluationType)?;
        let saved: Vec<EvaluationType> = rows
            .iter()
            .map(|row| EvaluationType {
                id: row.id.clone(),
                course_id: row.course_id.clone(),
                name: row.name.clone(),
                weight: row.weight,
                created_at: row.created_at,
            })
            .collect();
        self.evaluation_types.extend(saved.iter().cloned());
        Ok(saved)
    }

    async fn list_evaluations(&mut self, course_id: &str) -> Result<Vec<Evaluation>, sqlx::Error> {
        Ok(self.evaluations_of(course_id))
    }

    async fn insert_evaluations(
        &mut self,
        rows: &[NewEvaluation],
    ) -> Result<Vec<Evaluation>, sqlx::Error> {
        self.check(EntityKind::Evaluation)?;
        let saved: Vec<Evaluation> = rows
            .iter()
            .map(|row| Evaluation {
                id: row.id.clone(),
                course_id: row.course_id.clone(),
                name: row.name.clone(),
                date: row.date,
                category: row.category.clone(),
                grade_scale_id: row.grade_scale_id.clone(),
                subject_id: row.subject_id.clone(),
                evaluation_type_id: row.evaluation_type_id.clone(),
                approval_grade: row.approval_grade,
                qualification_grade: row.qualification_grade,
                grades_sent_by_email: row.grades_sent_by_email,
                custom_message: row.custom_message.clone(),
                created_at: row.created_at,
            })
            .collect();
        self.evaluations.extend(saved.iter().cloned());
        Ok(saved)
    }

    async fn list_grades(&mut self, course_id: &str) -> Result<Vec<Grade>, sqlx::Error> {
        Ok(self.grades_of(course_id))
    }

    async fn insert_grades(&mut self, rows: &[NewGrade]) -> Result<Vec<Grade>, sqlx::Error> {
        self.check(EntityKind::Grade)?;
        let saved: Vec<Grade> = rows
            .iter()
            .map(|row| Grade {
                id: row.id.clone(),
                course_id: row.course_id.clone(),
                student_id: row.student_id.clone(),
                evaluation_id: row.evaluation_id.clone(),
                grade: row.grade,
                grade_value: row.grade_value.clone(),
                created_at: row.created_at,
            })
            .collect();
        self.grades.extend(saved.iter().cloned());
        Ok(saved)
    }

    async fn list_schedules(
        &mut self,
        course_id: &str,
    ) -> Result<Vec<CourseSchedule>, sqlx::Error> {
        Ok(self.schedules_of(course_id))
    }

    async fn insert_schedules(
        &mut self,
        rows: &[NewCourseSchedule],
    ) -> Result<Vec<CourseSchedule>, sqlx::Error> {
        self.check(EntityKind::Schedule)?;
        let saved: Vec<CourseSchedule> = rows
            .iter()
            .map(|row| CourseSchedule {
                id: row.id.clone(),
                course_id: row.course_id.clone(),
                day_of_week: row.day_of_week,
                start_time: row.start_time,
                end_time: row.end_time,
                subject_id: row.subject_id.clone(),
                created_at: row.created_at,
            })
            .collect();
        self.schedules.extend(saved.iter().cloned());
        Ok(saved)
    }
}
