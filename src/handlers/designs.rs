use axum::{
    extract::{Extension, Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::store::{CreateDesign, Design, UpdateDesign};
use crate::AppState;

/// GET /api/designs - all of the caller's designs, newest first
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<Design>> {
    let designs = state.store.list(user.id).await?;
    Ok(ApiResponse::success(designs))
}

/// GET /api/designs/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Design> {
    let id = parse_design_id(&id)?;
    let design = state
        .store
        .get(id, user.id)
        .await?
        .ok_or_else(design_not_found)?;
    Ok(ApiResponse::success(design))
}

/// POST /api/designs - body has already passed the create rule set
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<CreateDesign>,
) -> ApiResult<Design> {
    let design = state.store.create(user.id, input).await?;
    Ok(ApiResponse::created(design))
}

/// PUT /api/designs/:id - partial update, body validated with optional fields
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(changes): Json<UpdateDesign>,
) -> ApiResult<Design> {
    let id = parse_design_id(&id)?;
    let design = state
        .store
        .update(id, user.id, changes)
        .await?
        .ok_or_else(design_not_found)?;
    Ok(ApiResponse::success(design))
}

/// DELETE /api/designs/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_design_id(&id)?;
    if !state.store.delete(id, user.id).await? {
        return Err(design_not_found());
    }
    Ok(ApiResponse::message("Design deleted"))
}

fn parse_design_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request("Invalid design id"))
}

/// Missing and foreign-owned designs answer identically, so a caller cannot
/// probe for ids that exist under other accounts.
fn design_not_found() -> ApiError {
    ApiError::not_found("Design not found")
}
