//! Handler for the `/choices` resource.

use axum::Json;
use intake_core::choices::{Choice, ProjectPriority, ProjectStatus};
use serde::Serialize;

use crate::response::DataResponse;

/// The closed value sets a client form needs.
#[derive(Debug, Serialize)]
pub struct ChoiceSets {
    pub statuses: Vec<Choice>,
    pub priorities: Vec<Choice>,
}

/// GET /api/v1/choices
pub async fn list() -> Json<DataResponse<ChoiceSets>> {
    Json(DataResponse {
        data: ChoiceSets {
            statuses: ProjectStatus::choices(),
            priorities: ProjectPriority::choices(),
        },
    })
}
