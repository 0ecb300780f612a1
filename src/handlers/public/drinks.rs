// handlers/public/drinks.rs - GET /drinks handler

use axum::extract::State;

use crate::app::AppState;
use crate::database::models::{Drink, DrinkSummary};
use crate::error::ApiError;
use crate::handlers::DrinksBody;
use crate::middleware::{ApiResponse, ApiResult};

/// Short view of the whole menu; an empty menu is a 404
pub async fn drinks_list(State(state): State<AppState>) -> ApiResult<DrinksBody<DrinkSummary>> {
    let drinks = state.store.all().await?;
    if drinks.is_empty() {
        return Err(ApiError::not_found());
    }

    Ok(ApiResponse::success(DrinksBody {
        drinks: drinks.iter().map(Drink::short).collect(),
    }))
}
