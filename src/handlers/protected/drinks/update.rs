// handlers/protected/drinks/update.rs - PATCH /drinks/:id handler

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};

use crate::app::AppState;
use crate::auth::Claims;
use crate::database::models::{parse_recipe, DrinkDetail, RecipeError};
use crate::error::ApiError;
use crate::handlers::{DrinkPayload, DrinksBody};
use crate::middleware::{ApiResponse, ApiResult};

/// Partial update: only a non-empty `title` and a non-empty `recipe` are applied
pub async fn drink_update(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<DrinkPayload>, JsonRejection>,
) -> ApiResult<DrinksBody<DrinkDetail>> {
    let Path(id) = id.map_err(|_| ApiError::not_found())?;
    let mut drink = state.store.find(id).await?.ok_or_else(ApiError::not_found)?;

    let Json(payload) = payload.map_err(|e| {
        tracing::debug!("Rejected drink body: {}", e);
        ApiError::bad_request()
    })?;

    if let Some(title) = payload.title() {
        drink.title = title.to_string();
    }
    match payload.recipe.as_ref().map(parse_recipe) {
        Some(Ok(recipe)) => drink.recipe = recipe,
        None | Some(Err(RecipeError::Missing)) => {}
        Some(Err(err)) => return Err(err.into()),
    }

    state
        .store
        .update(&drink)
        .await
        .map_err(ApiError::from_mutation)?;

    tracing::info!("{} updated drink {}", claims.subject(), drink.id);

    Ok(ApiResponse::success(DrinksBody {
        drinks: vec![drink.long()],
    }))
}
