use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const RIDE_REQUEST_TITLE: &str = "New Request";

// Record notification di `notifications/{key}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RideRequestNotification {
    pub requester_email: String,
    pub driver_name: String,
    pub title: String,
    pub message: String,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl RideRequestNotification {
    // Buat notification request dari rider untuk driver
    pub fn new(requester_email: Option<&str>, driver_name: &str) -> Self {
        let requester_email = requester_email.unwrap_or_default().to_string();
        let message = format!(
            "You have received a new request from {} for driver {}.",
            requester_email, driver_name
        );

        Self {
            requester_email,
            driver_name: driver_name.to_string(),
            title: RIDE_REQUEST_TITLE.to_string(),
            message,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RideRequest {
    pub driver_id: String,
    /// Kalau kosong, nama diambil dari profile driver
    pub driver_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RideRequestResponse {
    pub notification_id: String,
    pub message: String,
}
