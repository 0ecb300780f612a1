// handlers/public/mod.rs - Endpoints that need no token
pub mod drinks;  // GET /drinks
pub mod service; // GET /, GET /health, fallback

pub use drinks::drinks_list;
pub use service::{health, not_found, root};
