// handlers/protected/drinks/mod.rs - Drink handlers that require a permission
//
// Routes and the permission each one is registered with:
//   GET    /drinks-detail  get:drinks-detail
//   POST   /drinks         post:drinks
//   PATCH  /drinks/:id     patch:drinks
//   DELETE /drinks/:id     delete:drinks
pub mod create;
pub mod delete;
pub mod detail;
pub mod update;

pub use create::drink_create;
pub use delete::drink_delete;
pub use detail::drinks_detail;
pub use update::drink_update;
