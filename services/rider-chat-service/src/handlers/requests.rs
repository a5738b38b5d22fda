// Ride request Handlers untuk Rider Chat Service
use axum::{extract::State, http::StatusCode, response::Json};

use crate::{
    config::AppState,
    domain::notification::{RideRequest, RideRequestResponse},
    error::AppError,
    middleware::AuthUser,
};

// Kirim ride request ke driver
#[utoipa::path(
    post,
    path = "/api/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = RideRequest,
    responses(
        (status = 201, description = "Request terkirim ke driver", body = RideRequestResponse),
        (status = 400, description = "Request tidak valid"),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Store tidak bisa diakses")
    )
)]
pub async fn send_ride_request(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<RideRequest>,
) -> Result<(StatusCode, Json<RideRequestResponse>), AppError> {
    let notification_id = state
        .chat
        .send_ride_request(
            user.email.as_deref(),
            &request.driver_id,
            request.driver_name.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RideRequestResponse {
            notification_id,
            message: "Request terkirim".to_string(),
        }),
    ))
}
