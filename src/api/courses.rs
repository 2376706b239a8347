use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::{require_course_owner, CourseManager};
use crate::core::state::AppState;
use crate::core::time::format_primitive;
use crate::schemas::course::{DuplicateCourseRequest, DuplicateCourseResponse};
use crate::services::duplication::{self, DuplicationRequest};

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/:course_id/duplicate", post(duplicate_course))
}

async fn duplicate_course(
    Path(course_id): Path<String>,
    CourseManager(professor): CourseManager,
    State(state): State<AppState>,
    Json(payload): Json<DuplicateCourseRequest>,
) -> Result<(StatusCode, Json<DuplicateCourseResponse>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let source = require_course_owner(&state, &professor, &course_id).await?;

    let course = duplication::duplicate_course(
        state.db(),
        &DuplicationRequest {
            source_course_id: source.id,
            actor_id: Some(professor.id),
            name: payload.name,
            selection: payload.selection,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DuplicateCourseResponse {
            message: "Course duplicated successfully".to_string(),
            created_at: format_primitive(course.created_at),
            new_course_id: course.id,
            new_course_name: course.name,
        }),
    ))
}
