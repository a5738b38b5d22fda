// Domain model untuk profile user di `users/{user_id}`
use serde::{Deserialize, Serialize};

/// Nama pengganti ketika profile tidak bisa di-resolve.
pub const UNKNOWN_USER: &str = "Unknown User";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserProfile {
    /// Nama untuk ditampilkan: `name`, lalu `email`. String kosong dianggap
    /// tidak ada.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.email.as_deref().filter(|e| !e.is_empty()))
    }
}
