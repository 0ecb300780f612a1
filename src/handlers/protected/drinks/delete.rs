// handlers/protected/drinks/delete.rs - DELETE /drinks/:id handler

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension,
};
use serde::Serialize;

use crate::app::AppState;
use crate::auth::Claims;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct DeletedBody {
    pub delete: i32,
}

pub async fn drink_delete(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<DeletedBody> {
    let Path(id) = id.map_err(|_| ApiError::not_found())?;
    let drink = state.store.find(id).await?.ok_or_else(ApiError::not_found)?;

    state
        .store
        .delete(&drink)
        .await
        .map_err(ApiError::from_mutation)?;

    tracing::info!("{} deleted drink {} '{}'", claims.subject(), drink.id, drink.title);

    Ok(ApiResponse::success(DeletedBody { delete: id }))
}
