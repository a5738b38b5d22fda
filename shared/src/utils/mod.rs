pub mod http_client;
pub mod jwt;
pub mod validation;
