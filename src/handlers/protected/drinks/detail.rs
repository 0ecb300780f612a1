// handlers/protected/drinks/detail.rs - GET /drinks-detail handler

use axum::{extract::State, Extension};

use crate::app::AppState;
use crate::auth::Claims;
use crate::database::models::{Drink, DrinkDetail};
use crate::error::ApiError;
use crate::handlers::DrinksBody;
use crate::middleware::{ApiResponse, ApiResult};

/// Long view of the whole menu, including ingredient names
pub async fn drinks_detail(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<DrinksBody<DrinkDetail>> {
    let drinks = state.store.all().await?;
    if drinks.is_empty() {
        return Err(ApiError::not_found());
    }

    tracing::debug!("{} listed {} drinks in detail", claims.subject(), drinks.len());

    Ok(ApiResponse::success(DrinksBody {
        drinks: drinks.iter().map(Drink::long).collect(),
    }))
}
