use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{Drink, DrinkRow, Ingredient, NewDrink};
use super::store::{DrinkStore, StoreError};

/// `DrinkStore` backed by the `drink` table
#[derive(Clone)]
pub struct PgDrinkStore {
    pool: PgPool,
}

impl PgDrinkStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn decode(row: DrinkRow) -> Result<Drink, StoreError> {
    let id = row.id;
    Drink::try_from(row).map_err(|source| StoreError::Corrupt { id, source })
}

fn encode_recipe(recipe: &[Ingredient]) -> Result<String, StoreError> {
    serde_json::to_string(recipe).map_err(|e| StoreError::Query(format!("failed to serialize recipe: {}", e)))
}

#[async_trait]
impl DrinkStore for PgDrinkStore {
    async fn all(&self) -> Result<Vec<Drink>, StoreError> {
        let rows = sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drink ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(decode).collect()
    }

    async fn find(&self, id: i32) -> Result<Option<Drink>, StoreError> {
        sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drink WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(decode)
            .transpose()
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Drink>, StoreError> {
        sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drink WHERE title = $1")
            .bind(title)
            .fetch_optional(&self.pool)
            .await?
            .map(decode)
            .transpose()
    }

    async fn insert(&self, drink: NewDrink) -> Result<Drink, StoreError> {
        let recipe = encode_recipe(&drink.recipe)?;
        let row = sqlx::query_as::<_, DrinkRow>(
            "INSERT INTO drink (title, recipe) VALUES ($1, $2) RETURNING id, title, recipe",
        )
        .bind(&drink.title)
        .bind(&recipe)
        .fetch_one(&self.pool)
        .await?;
        decode(row)
    }

    async fn update(&self, drink: &Drink) -> Result<(), StoreError> {
        let recipe = encode_recipe(&drink.recipe)?;
        let result = sqlx::query("UPDATE drink SET title = $1, recipe = $2 WHERE id = $3")
            .bind(&drink.title)
            .bind(&recipe)
            .bind(drink.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(drink.id));
        }
        Ok(())
    }

    async fn delete(&self, drink: &Drink) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM drink WHERE id = $1")
            .bind(drink.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(drink.id));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
