use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::models::{Drink, NewDrink};
use super::store::{DrinkStore, StoreError};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i32, Drink>,
    last_id: i32,
}

/// Process-local drink table with the same title constraint as the SQL schema
#[derive(Debug, Default)]
pub struct MemoryDrinkStore {
    table: RwLock<Table>,
}

impl MemoryDrinkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn title_taken(table: &Table, title: &str, except: Option<i32>) -> bool {
    table
        .rows
        .values()
        .any(|d| d.title == title && Some(d.id) != except)
}

#[async_trait]
impl DrinkStore for MemoryDrinkStore {
    async fn all(&self) -> Result<Vec<Drink>, StoreError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Drink>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Drink>, StoreError> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .find(|d| d.title == title)
            .cloned())
    }

    async fn insert(&self, drink: NewDrink) -> Result<Drink, StoreError> {
        let mut table = self.table.write().await;
        if title_taken(&table, &drink.title, None) {
            return Err(StoreError::UniqueViolation(format!("title '{}'", drink.title)));
        }

        table.last_id += 1;
        let stored = Drink {
            id: table.last_id,
            title: drink.title,
            recipe: drink.recipe,
        };
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, drink: &Drink) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        if title_taken(&table, &drink.title, Some(drink.id)) {
            return Err(StoreError::UniqueViolation(format!("title '{}'", drink.title)));
        }

        match table.rows.get_mut(&drink.id) {
            Some(row) => {
                *row = drink.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(drink.id)),
        }
    }

    async fn delete(&self, drink: &Drink) -> Result<(), StoreError> {
        self.table
            .write()
            .await
            .rows
            .remove(&drink.id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(drink.id))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
