pub mod auth;

pub use auth::{current_user_middleware, CurrentUser};
