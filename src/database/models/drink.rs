use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use sqlx::FromRow;
use thiserror::Error;

/// A single recipe component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: Number,
}

/// Ingredient as shown to the public: the name stays hidden
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientSummary {
    pub color: String,
    pub parts: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Drink awaiting its first insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewDrink {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Short view: `{id, title, recipe: [{color, parts}]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrinkSummary {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<IngredientSummary>,
}

/// Long view: `{id, title, recipe: [{name, color, parts}]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrinkDetail {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl Drink {
    pub fn short(&self) -> DrinkSummary {
        DrinkSummary {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|i| IngredientSummary {
                    color: i.color.clone(),
                    parts: i.parts.clone(),
                })
                .collect(),
        }
    }

    pub fn long(&self) -> DrinkDetail {
        DrinkDetail {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.clone(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecipeError {
    #[error("Recipe is required")]
    Missing,

    #[error("Recipe must be an ingredient or a list of ingredients.")]
    Malformed,
}

/// Interprets a client-supplied recipe value.
///
/// A single ingredient object is wrapped into a one-element list; a list is
/// taken as is. Null, `{}` and `[]` count as "no recipe".
pub fn parse_recipe(value: &Value) -> Result<Vec<Ingredient>, RecipeError> {
    match value {
        Value::Null => Err(RecipeError::Missing),
        Value::Object(map) if map.is_empty() => Err(RecipeError::Missing),
        Value::Array(items) if items.is_empty() => Err(RecipeError::Missing),
        Value::Object(_) => serde_json::from_value::<Ingredient>(value.clone())
            .map(|ingredient| vec![ingredient])
            .map_err(|_| RecipeError::Malformed),
        Value::Array(_) => {
            serde_json::from_value::<Vec<Ingredient>>(value.clone()).map_err(|_| RecipeError::Malformed)
        }
        _ => Err(RecipeError::Malformed),
    }
}

/// Raw `drink` table row; the recipe column holds serialized JSON text
#[derive(Debug, Clone, FromRow)]
pub struct DrinkRow {
    pub id: i32,
    pub title: String,
    pub recipe: String,
}

impl TryFrom<DrinkRow> for Drink {
    type Error = serde_json::Error;

    fn try_from(row: DrinkRow) -> Result<Self, Self::Error> {
        Ok(Drink {
            id: row.id,
            title: row.title,
            recipe: serde_json::from_str(&row.recipe)?,
        })
    }
}
