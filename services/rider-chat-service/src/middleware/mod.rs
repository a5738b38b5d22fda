// Middleware untuk Rider Chat Service
pub mod auth;

pub use auth::AuthUser;
