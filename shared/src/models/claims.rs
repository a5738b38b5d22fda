use serde::{Deserialize, Serialize};

/// Model JWT claims yang digunakan di seluruh sistem untuk authentication.
///
/// `sub` adalah user id yang sama dengan key di `users/{id}` pada realtime
/// database, jadi bisa langsung dipakai sebagai participant id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub token_type: String,
}

impl TokenClaims {
    /// Cek apakah token adalah access token
    pub fn is_access_token(&self) -> bool {
        self.token_type == "access"
    }

    /// Cek apakah user memiliki role rider
    pub fn is_rider(&self) -> bool {
        self.role == "rider"
    }

    /// Cek apakah user memiliki role driver
    pub fn is_driver(&self) -> bool {
        self.role == "driver"
    }

    /// Rider dan driver sama-sama boleh chat
    pub fn can_access_chat(&self) -> bool {
        self.is_rider() || self.is_driver()
    }
}
