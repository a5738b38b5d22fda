// Handlers untuk Rider Chat Service
pub mod conversations;
pub mod requests;
