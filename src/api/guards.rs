use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::{header, request::Parts};

use crate::api::errors::ApiError;
use crate::core::{security, state::AppState};
use crate::db::models::{Course, Professor};
use crate::db::types::ProfessorRole;
use crate::repositories;

pub(crate) struct CurrentProfessor(pub(crate) Professor);

/// A professor allowed to manage courses. Administrators only manage
/// accounts, so they are turned away here.
pub(crate) struct CourseManager(pub(crate) Professor);

#[async_trait]
impl FromRequestParts<AppState> for CurrentProfessor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state) = State::<AppState>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to access application state"))?;

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized("Invalid authentication credentials"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized("Invalid authentication credentials"))?;

        let claims = security::verify_token(token, app_state.settings())
            .map_err(|_| ApiError::Unauthorized("Invalid authentication credentials"))?;

        let professor = repositories::professors::find_by_id(app_state.db(), &claims.sub)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load professor"))?;

        let Some(professor) = professor else {
            return Err(ApiError::Unauthorized("Professor not found"));
        };

        if !professor.is_active {
            return Err(ApiError::Unauthorized("Invalid authentication credentials"));
        }

        Ok(CurrentProfessor(professor))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CourseManager {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentProfessor(professor) = CurrentProfessor::from_request_parts(parts, state).await?;

        if professor.role == ProfessorRole::Admin {
            return Err(ApiError::Forbidden("admins cannot manage courses"));
        }

        Ok(CourseManager(professor))
    }
}

pub(crate) async fn require_course_owner(
    state: &AppState,
    professor: &Professor,
    course_id: &str,
) -> Result<Course, ApiError> {
    let course = repositories::courses::find_by_id(state.db(), course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch course"))?;

    let Some(course) = course else {
        return Err(ApiError::NotFound("Course not found".to_string()));
    };

    if course.professor_id != professor.id {
        return Err(ApiError::Forbidden("No access to this course"));
    }

    Ok(course)
}
