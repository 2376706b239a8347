use uuid::Uuid;

use super::store::CourseStore;
use super::DuplicationError;
use crate::core::time::primitive_now_utc;
use crate::db::models::Course;
use crate::repositories::courses::CreateCourse;

const COPY_SUFFIX: &str = " - Copy";

/// Creates the course every clone hangs off. The acting professor is resolved
/// up front so that an unknown caller fails before anything is written.
#[derive(Debug)]
pub(crate) struct CourseRootBuilder {
    owner_id: String,
}

impl CourseRootBuilder {
    pub(crate) async fn for_actor<S>(
        store: &mut S,
        actor_id: Option<&str>,
    ) -> Result<Self, DuplicationError>
    where
        S: CourseStore + ?Sized,
    {
        let actor_id = actor_id
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(DuplicationError::Unauthorized)?;

        match store.find_professor(actor_id).await? {
            Some(professor) if professor.is_active => Ok(Self { owner_id: professor.id }),
            _ => Err(DuplicationError::Unauthorized),
        }
    }

    pub(crate) fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub(crate) fn draft(&self, source: &Course, name: Option<&str>) -> CreateCourse {
        let name = name
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}{COPY_SUFFIX}", source.name));

        CreateCourse {
            id: Uuid::new_v4().to_string(),
            name,
            school: source.school.clone(),
            description: source.description.clone(),
            professor_id: self.owner_id.clone(),
            archived: false,
            archived_at: None,
            approval_grade: source.approval_grade,
            qualification_grade: source.qualification_grade,
            created_at: primitive_now_utc(),
        }
    }

    pub(crate) async fn build<S>(
        &self,
        store: &mut S,
        source: &Course,
        name: Option<&str>,
    ) -> Result<Course, DuplicationError>
    where
        S: CourseStore + ?Sized,
    {
        let draft = self.draft(source, name);
        Ok(store.create_course(&draft).await?)
    }
}
