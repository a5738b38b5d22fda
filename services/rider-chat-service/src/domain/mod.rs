// Modul domain untuk Rider Chat Service
pub mod conversation;
pub mod message;
pub mod notification;
pub mod user;

// Export publik untuk semua services
pub use conversation::*;
pub use message::*;
pub use notification::*;
pub use user::*;
