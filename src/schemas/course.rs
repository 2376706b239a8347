use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::duplication::DuplicationSelection;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct DuplicateCourseRequest {
    #[serde(default)]
    #[validate(length(max = 255, message = "name must be at most 255 characters"))]
    pub(crate) name: Option<String>,
    #[serde(flatten)]
    pub(crate) selection: DuplicationSelection,
}

#[derive(Debug, Serialize)]
pub(crate) struct DuplicateCourseResponse {
    pub(crate) message: String,
    pub(crate) new_course_id: String,
    pub(crate) new_course_name: String,
    pub(crate) created_at: String,
}
