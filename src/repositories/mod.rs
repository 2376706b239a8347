pub(crate) mod course_schedules;
pub(crate) mod courses;
pub(crate) mod evaluation_types;
pub(crate) mod evaluations;
pub(crate) mod grades;
pub(crate) mod health;
pub(crate) mod professors;
pub(crate) mod students;
pub(crate) mod subjects;
