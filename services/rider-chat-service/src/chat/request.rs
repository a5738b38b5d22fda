use super::{validate_user_id, ChatService};
use crate::domain::RideRequestNotification;
use crate::error::AppError;

impl ChatService {
    /// Kirim ride request dari rider ke driver sebagai notification baru.
    ///
    /// Kalau nama driver tidak dikirim client, nama diambil dari profile
    /// driver dengan fallback yang sama seperti list conversation.
    pub async fn send_ride_request(
        &self,
        requester_email: Option<&str>,
        driver_id: &str,
        driver_name: Option<&str>,
    ) -> Result<String, AppError> {
        validate_user_id(driver_id, "driverId")?;

        let driver_name = match driver_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => self.display_name_for(Some(driver_id)).await,
        };

        let notification = RideRequestNotification::new(requester_email, &driver_name);
        let notification_id = self.notifications.append(&notification).await?;

        tracing::info!(
            "Ride request {} sent to driver {} ({})",
            notification_id,
            driver_id,
            driver_name
        );

        Ok(notification_id)
    }
}
