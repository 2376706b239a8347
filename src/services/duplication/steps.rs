use time::{Duration, PrimitiveDateTime};
use uuid::Uuid;

use super::id_map::{EntityKind, IdMap, DEFAULT_SUBJECT_KEY};
use super::store::CourseStore;
use super::{DuplicationError, DuplicationSelection};
use crate::core::time::primitive_now_utc;
use crate::repositories::course_schedules::NewCourseSchedule;
use crate::repositories::evaluation_types::NewEvaluationType;
use crate::repositories::evaluations::NewEvaluation;
use crate::repositories::grades::NewGrade;
use crate::repositories::students::NewStudent;
use crate::repositories::subjects::NewSubject;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CopyStep {
    Subjects,
    DefaultSubject,
    EvaluationTypes,
    Students,
    Evaluations,
    Grades,
    Schedules,
}

/// Orders the steps so that every reference a step remaps was registered by
/// an earlier one.
pub(crate) fn plan(selection: &DuplicationSelection) -> Vec<CopyStep> {
    let mut steps = Vec::with_capacity(7);

    steps.push(if selection.copy_subjects { CopyStep::Subjects } else { CopyStep::DefaultSubject });
    if selection.copy_evaluation_types {
        steps.push(CopyStep::EvaluationTypes);
    }
    if selection.copy_students {
        steps.push(CopyStep::Students);
    }
    if selection.copy_evaluations {
        steps.push(CopyStep::Evaluations);
        if selection.copy_grades {
            steps.push(CopyStep::Grades);
        }
    }
    if selection.copy_schedules {
        steps.push(CopyStep::Schedules);
    }

    steps
}

impl CopyStep {
    pub(crate) fn kind(self) -> EntityKind {
        match self {
            CopyStep::Subjects | CopyStep::DefaultSubject => EntityKind::Subject,
            CopyStep::EvaluationTypes => EntityKind::EvaluationType,
            CopyStep::Students => EntityKind::Student,
            CopyStep::Evaluations => EntityKind::Evaluation,
            CopyStep::Grades => EntityKind::Grade,
            CopyStep::Schedules => EntityKind::Schedule,
        }
    }

    /// Runs the step and returns how many records it created.
    pub(crate) async fn run<S>(
        self,
        store: &mut S,
        source_course_id: &str,
        target_course_id: &str,
        map: &mut IdMap,
    ) -> Result<usize, DuplicationError>
    where
        S: CourseStore + ?Sized,
    {
        match self {
            CopyStep::Subjects => {
                copy_subjects(store, source_course_id, target_course_id, map).await
            }
            CopyStep::DefaultSubject => create_default_subject(store, target_course_id, map).await,
            CopyStep::EvaluationTypes => {
                copy_evaluation_types(store, source_course_id, target_course_id, map).await
            }
            CopyStep::Students => {
                copy_students(store, source_course_id, target_course_id, map).await
            }
            CopyStep::Evaluations => {
                copy_evaluations(store, source_course_id, target_course_id, map).await
            }
            CopyStep::Grades => copy_grades(store, source_course_id, target_course_id, map).await,
            CopyStep::Schedules => {
                copy_schedules(store, source_course_id, target_course_id, map).await
            }
        }
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Clones of one batch are stamped a microsecond apart so that listing the new
/// course by `created_at` yields the source order.
fn stamp(base: PrimitiveDateTime, index: usize) -> PrimitiveDateTime {
    base + Duration::microseconds(index as i64)
}

async fn copy_subjects<S>(
    store: &mut S,
    source_course_id: &str,
    target_course_id: &str,
    map: &mut IdMap,
) -> Result<usize, DuplicationError>
where
    S: CourseStore + ?Sized,
{
    let originals = store.list_subjects(source_course_id).await?;
    if originals.is_empty() {
        return create_default_subject(store, target_course_id, map).await;
    }

    let now = primitive_now_utc();
    let clones: Vec<NewSubject> = originals
        .iter()
        .enumerate()
        .map(|(index, subject)| NewSubject {
            id: new_id(),
            course_id: target_course_id.to_string(),
            name: subject.name.clone(),
            created_at: stamp(now, index),
        })
        .collect();

    let saved = store.insert_subjects(&clones).await?;
    map.record_pairs(
        EntityKind::Subject,
        originals.iter().map(|subject| subject.id.as_str()),
        saved.iter().map(|subject| subject.id.as_str()),
    );
    Ok(saved.len())
}

async fn create_default_subject<S>(
    store: &mut S,
    target_course_id: &str,
    map: &mut IdMap,
) -> Result<usize, DuplicationError>
where
    S: CourseStore + ?Sized,
{
    let default_subject = NewSubject {
        id: new_id(),
        course_id: target_course_id.to_string(),
        name: None,
        created_at: primitive_now_utc(),
    };

    let saved = store.insert_subjects(std::slice::from_ref(&default_subject)).await?;
    map.record_pairs(
        EntityKind::Subject,
        [DEFAULT_SUBJECT_KEY],
        saved.iter().map(|subject| subject.id.as_str()),
    );
    Ok(saved.len())
}

async fn copy_evaluation_types<S>(
    store: &mut S,
    source_course_id: &str,
    target_course_id: &str,
    map: &mut IdMap,
) -> Result<usize, DuplicationError>
where
    S: CourseStore + ?Sized,
{
    let originals = store.list_evaluation_types(source_course_id).await?;
    let now = primitive_now_utc();
    let clones: Vec<NewEvaluationType> = originals
        .iter()
        .enumerate()
        .map(|(index, evaluation_type)| NewEvaluationType {
            id: new_id(),
            course_id: target_course_id.to_string(),
            name: evaluation_type.name.clone(),
            weight: evaluation_type.weight,
            created_at: stamp(now, index),
        })
        .collect();

    let saved = store.insert_evaluation_types(&clones).await?;
    map.record_pairs(
        EntityKind::EvaluationType,
        originals.iter().map(|evaluation_type| evaluation_type.id.as_str()),
        saved.iter().map(|evaluation_type| evaluation_type.id.as_str()),
    );
    Ok(saved.len())
}

async fn copy_students<S>(
    store: &mut S,
    source_course_id: &str,
    target_course_id: &str,
    map: &mut IdMap,
) -> Result<usize, DuplicationError>
where
    S: CourseStore + ?Sized,
{
    let originals = store.list_students(source_course_id).await?;
    let now = primitive_now_utc();
    let clones: Vec<NewStudent> = originals
        .iter()
        .enumerate()
        .map(|(index, student)| NewStudent {
            id: new_id(),
            course_id: target_course_id.to_string(),
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            email: student.email.clone(),
            cel: student.cel.clone(),
            document: student.document.clone(),
            created_at: stamp(now, index),
        })
        .collect();

    let saved = store.insert_students(&clones).await?;
    map.record_pairs(
        EntityKind::Student,
        originals.iter().map(|student| student.id.as_str()),
        saved.iter().map(|student| student.id.as_str()),
    );
    Ok(saved.len())
}

async fn copy_evaluations<S>(
    store: &mut S,
    source_course_id: &str,
    target_course_id: &str,
    map: &mut IdMap,
) -> Result<usize, DuplicationError>
where
    S: CourseStore + ?Sized,
{
    let originals = store.list_evaluations(source_course_id).await?;
    let now = primitive_now_utc();
    let clones: Vec<NewEvaluation> = originals
        .iter()
        .enumerate()
        .map(|(index, evaluation)| {
            let evaluation_type_id = evaluation
                .evaluation_type_id
                .as_deref()
                .and_then(|id| map.get(EntityKind::EvaluationType, id))
                .map(str::to_string);

            // Unmapped subjects land on the first cloned subject when there is one.
            let subject_key = evaluation.subject_id.as_deref().unwrap_or(DEFAULT_SUBJECT_KEY);
            let subject_id = map
                .get(EntityKind::Subject, subject_key)
                .or_else(|| map.first(EntityKind::Subject))
                .map(str::to_string);

            NewEvaluation {
                id: new_id(),
                course_id: target_course_id.to_string(),
                name: evaluation.name.clone(),
                date: evaluation.date,
                category: evaluation.category.clone(),
                grade_scale_id: evaluation.grade_scale_id.clone(),
                subject_id,
                evaluation_type_id,
                approval_grade: evaluation.approval_grade,
                qualification_grade: evaluation.qualification_grade,
                grades_sent_by_email: false,
                custom_message: None,
                created_at: stamp(now, index),
            }
        })
        .collect();

    let saved = store.insert_evaluations(&clones).await?;
    map.record_pairs(
        EntityKind::Evaluation,
        originals.iter().map(|evaluation| evaluation.id.as_str()),
        saved.iter().map(|evaluation| evaluation.id.as_str()),
    );
    Ok(saved.len())
}

async fn copy_grades<S>(
    store: &mut S,
    source_course_id: &str,
    target_course_id: &str,
    map: &mut IdMap,
) -> Result<usize, DuplicationError>
where
    S: CourseStore + ?Sized,
{
    if map.is_empty(EntityKind::Evaluation) {
        return Ok(0);
    }

    let originals = store.list_grades(source_course_id).await?;
    let now = primitive_now_utc();
    let clones: Vec<NewGrade> = originals
        .iter()
        .enumerate()
        .filter_map(|(index, grade)| {
            let student_id = map.get(EntityKind::Student, &grade.student_id)?;
            let evaluation_id = map.get(EntityKind::Evaluation, &grade.evaluation_id)?;
            Some(NewGrade {
                id: new_id(),
                course_id: target_course_id.to_string(),
                student_id: student_id.to_string(),
                evaluation_id: evaluation_id.to_string(),
                grade: grade.grade,
                grade_value: grade.grade_value.clone(),
                created_at: stamp(now, index),
            })
        })
        .collect();

    if clones.is_empty() {
        return Ok(0);
    }

    let saved = store.insert_grades(&clones).await?;
    Ok(saved.len())
}

async fn copy_schedules<S>(
    store: &mut S,
    source_course_id: &str,
    target_course_id: &str,
    map: &mut IdMap,
) -> Result<usize, DuplicationError>
where
    S: CourseStore + ?Sized,
{
    let originals = store.list_schedules(source_course_id).await?;
    let now = primitive_now_utc();
    let clones: Vec<NewCourseSchedule> = originals
        .iter()
        .enumerate()
        .map(|(index, schedule)| NewCourseSchedule {
            id: new_id(),
            course_id: target_course_id.to_string(),
            day_of_week: schedule.day_of_week,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            subject_id: schedule
                .subject_id
                .as_deref()
                .and_then(|id| map.get(EntityKind::Subject, id))
                .map(str::to_string),
            created_at: stamp(now, index),
        })
        .collect();

    let saved = store.insert_schedules(&clones).await?;
    Ok(saved.len())
}
