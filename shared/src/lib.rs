//! Shared building blocks untuk semua Rider Chat services:
//! JWT claims, token validation, store key validation dan REST client
//! untuk realtime database.

pub mod models;
pub mod utils;
