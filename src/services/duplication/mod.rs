//! Course duplication: clones a course and a selected subset of its records
//! into a new course owned by the acting professor, keeping every reference
//! between the clones inside the new course.

mod id_map;
#[cfg(test)]
pub(crate) mod memory;
mod postgres;
mod root;
mod steps;
mod store;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;

pub(crate) use id_map::EntityKind;
pub(crate) use postgres::PgCourseStore;
pub(crate) use store::CourseStore;

use crate::core::metrics;
use crate::db::models::Course;
use id_map::IdMap;
use root::CourseRootBuilder;

#[derive(Debug, Error)]
pub(crate) enum DuplicationError {
    #[error("source course {0} not found")]
    SourceNotFound(String),
    #[error("no active professor to own the duplicated course")]
    Unauthorized,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DuplicationError {
    fn outcome(&self) -> &'static str {
        match self {
            DuplicationError::SourceNotFound(_) => "not_found",
            DuplicationError::Unauthorized => "unauthorized",
            DuplicationError::Database(_) => "error",
        }
    }
}

fn enabled() -> bool {
    true
}

/// Which dependent records travel with the course. Subjects, students and
/// schedules are copied unless switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct DuplicationSelection {
    #[serde(default = "enabled", alias = "copySubjects")]
    pub(crate) copy_subjects: bool,
    #[serde(default = "enabled", alias = "copyStudents")]
    pub(crate) copy_students: bool,
    #[serde(default, alias = "copyEvaluationTypes")]
    pub(crate) copy_evaluation_types: bool,
    #[serde(default, alias = "copyEvaluations")]
    pub(crate) copy_evaluations: bool,
    #[serde(default, alias = "copyGrades")]
    pub(crate) copy_grades: bool,
    #[serde(default = "enabled", alias = "copySchedules")]
    pub(crate) copy_schedules: bool,
}

impl Default for DuplicationSelection {
    fn default() -> Self {
        Self {
            copy_subjects: true,
            copy_students: true,
            copy_evaluation_types: false,
            copy_evaluations: false,
            copy_grades: false,
            copy_schedules: true,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct DuplicationRequest {
    pub(crate) source_course_id: String,
    pub(crate) actor_id: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) selection: DuplicationSelection,
}

/// Records created by one duplication run, per kind.
#[derive(Debug, Default)]
pub(crate) struct CloneCounts(Vec<(EntityKind, usize)>);

impl CloneCounts {
    fn add(&mut self, kind: EntityKind, count: usize) {
        match self.0.iter_mut().find(|(current, _)| *current == kind) {
            Some((_, total)) => *total += count,
            None => self.0.push((kind, count)),
        }
    }

    pub(crate) fn get(&self, kind: EntityKind) -> usize {
        self.0.iter().find(|(current, _)| *current == kind).map_or(0, |(_, total)| *total)
    }

    fn emit(&self) {
        for (kind, count) in &self.0 {
            metrics::record_cloned(kind.as_str(), *count);
        }
    }
}

/// Runs a duplication against `store`. The caller decides what happens to
/// the writes when an error comes back.
#[cfg_attr(not(test), allow(dead_code))]
pub(crate) async fn duplicate<S>(
    store: &mut S,
    source_course_id: &str,
    selection: &DuplicationSelection,
    actor_id: Option<&str>,
    name: Option<&str>,
) -> Result<Course, DuplicationError>
where
    S: CourseStore + ?Sized,
{
    let (course, _) =
        duplicate_counted(store, source_course_id, selection, actor_id, name).await?;
    Ok(course)
}

pub(crate) async fn duplicate_counted<S>(
    store: &mut S,
    source_course_id: &str,
    selection: &DuplicationSelection,
    actor_id: Option<&str>,
    name: Option<&str>,
) -> Result<(Course, CloneCounts), DuplicationError>
where
    S: CourseStore + ?Sized,
{
    let builder = CourseRootBuilder::for_actor(store, actor_id).await?;
    let source = store
        .find_course(source_course_id)
        .await?
        .ok_or_else(|| DuplicationError::SourceNotFound(source_course_id.to_string()))?;

    let course = builder.build(store, &source, name).await?;
    let mut counts = CloneCounts::default();
    counts.add(EntityKind::Course, 1);

    let mut map = IdMap::new();
    for step in steps::plan(selection) {
        let created = step.run(store, &source.id, &course.id, &mut map).await?;
        tracing::debug!(
            course_id = %course.id,
            step = ?step,
            created,
            "Duplication step finished"
        );
        counts.add(step.kind(), created);
    }

    tracing::info!(
        source_course_id = %source.id,
        course_id = %course.id,
        owner_id = %builder.owner_id(),
        subjects = counts.get(EntityKind::Subject),
        evaluation_types = counts.get(EntityKind::EvaluationType),
        students = counts.get(EntityKind::Student),
        evaluations = counts.get(EntityKind::Evaluation),
        grades = counts.get(EntityKind::Grade),
        schedules = counts.get(EntityKind::Schedule),
        "Course duplicated"
    );

    Ok((course, counts))
}

/// Duplicates inside a single transaction on `pool`; nothing is kept unless
/// every step succeeds. Clone counters are only published after the commit.
pub(crate) async fn duplicate_course(
    pool: &PgPool,
    request: &DuplicationRequest,
) -> Result<Course, DuplicationError> {
    let result = async {
        let mut store = PgCourseStore::begin(pool).await?;
        let (course, counts) = duplicate_counted(
            &mut store,
            &request.source_course_id,
            &request.selection,
            request.actor_id.as_deref(),
            request.name.as_deref(),
        )
        .await?;
        store.commit().await?;
        Ok::<_, DuplicationError>((course, counts))
    }
    .await;

    match result {
        Ok((course, counts)) => {
            counts.emit();
            metrics::record_duplication("success");
            Ok(course)
        }
        Err(err) => {
            tracing::warn!(
                source_course_id = %request.source_course_id,
                error = %err,
                "Course duplication aborted"
            );
            metrics::record_duplication(err.outcome());
            Err(err)
        }
    }
}
