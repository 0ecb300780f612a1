pub mod drink;

pub use drink::{
    parse_recipe, Drink, DrinkDetail, DrinkRow, DrinkSummary, Ingredient, IngredientSummary, NewDrink,
    RecipeError,
};
