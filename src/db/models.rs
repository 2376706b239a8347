use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, PrimitiveDateTime, Time};

use crate::db::types::{ProfessorRole, Weekday};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Professor {
    pub(crate) id: String,
    pub(crate) email: String,
    pub(crate) full_name: String,
    pub(crate) role: ProfessorRole,
    pub(crate) is_active: bool,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Course {
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
    pub(crate) updated_at: PrimitiveDateTime,
}

/// `name` is `None` for the unnamed default subject of a course.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Subject {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) name: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Student {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) first_name: String,
    pub(crate) last_name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) cel: Option<String>,
    pub(crate) document: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
}

/// A `None` weight means the type weighs the same as every other type.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct EvaluationType {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) name: String,
    pub(crate) weight: Option<f64>,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Evaluation {
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

/// Either `grade` (numeric scale) or `grade_value` (categorical scale) is set;
/// both stay empty until the student is graded.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Grade {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) student_id: String,
    pub(crate) evaluation_id: String,
    pub(crate) grade: Option<f64>,
    pub(crate) grade_value: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct CourseSchedule {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) day_of_week: Weekday,
    pub(crate) start_time: Time,
    pub(crate) end_time: Time,
    pub(crate) subject_id: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
}
