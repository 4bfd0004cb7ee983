//! Handlers for the `/categories` resource.
//!
//! Reads are public so the submission form can offer categories; writes
//! require the `admin` role.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use intake_core::error::CoreError;
use intake_core::project::validate_category_name;
use intake_core::types::DbId;
use intake_db::models::category::{Category, CreateCategory, UpdateCategory};
use intake_db::repositories::CategoryRepo;
use intake_events::AppEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

const LOGGER: &str = "categories";

/// GET /api/v1/categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(category))
}

/// POST /api/v1/categories
///
/// Duplicate names are rejected by `uq_categories_name` with 409.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    validate_category_name(&input.name)?;

    let category = CategoryRepo::create(&state.pool, &input).await?;

    state.log_event(
        AppEvent::new(LOGGER, format!("Created category '{category}'")).by(&admin.username),
    );
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    validate_category_name(&input.name)?;

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    state.log_event(
        AppEvent::new(LOGGER, format!("Renamed category #{id} to '{category}'"))
            .by(&admin.username),
    );
    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id}
///
/// Projects in the category keep existing with no category.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CategoryRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }

    state.log_event(AppEvent::new(LOGGER, format!("Deleted category #{id}")).by(&admin.username));
    Ok(StatusCode::NO_CONTENT)
}
