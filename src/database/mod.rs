pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryDrinkStore;
pub use models::{Drink, Ingredient, NewDrink};
pub use postgres::PgDrinkStore;
pub use store::{DrinkStore, StoreError};
