// handlers/protected/drinks/create.rs - POST /drinks handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde_json::Value;

use crate::app::AppState;
use crate::auth::Claims;
use crate::database::models::{parse_recipe, DrinkDetail, NewDrink};
use crate::error::ApiError;
use crate::handlers::{DrinkPayload, DrinksBody};
use crate::middleware::{ApiResponse, ApiResult};

pub async fn drink_create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<DrinkPayload>, JsonRejection>,
) -> ApiResult<DrinksBody<DrinkDetail>> {
    let Json(payload) = payload.map_err(|e| {
        tracing::debug!("Rejected drink body: {}", e);
        ApiError::bad_request()
    })?;

    let title = payload.title().ok_or_else(ApiError::bad_request)?.to_string();
    if state.store.find_by_title(&title).await?.is_some() {
        return Err(ApiError::bad_request_with("Title already exists."));
    }

    let recipe = parse_recipe(payload.recipe.as_ref().unwrap_or(&Value::Null))?;

    let drink = state
        .store
        .insert(NewDrink { title, recipe })
        .await
        .map_err(ApiError::from_mutation)?;

    tracing::info!("{} created drink {} '{}'", claims.subject(), drink.id, drink.title);

    Ok(ApiResponse::success(DrinksBody {
        drinks: vec![drink.long()],
    }))
}
