// Repository modules untuk Rider Chat Service
pub mod conversation_repo;
pub mod notification_repo;
pub mod user_repo;

// Export publik
pub use conversation_repo::*;
pub use notification_repo::*;
pub use user_repo::*;
