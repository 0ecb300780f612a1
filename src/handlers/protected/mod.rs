// handlers/protected/mod.rs - Endpoints behind a permission guard
pub mod drinks;

pub use drinks::{drink_create, drink_delete, drink_update, drinks_detail};
