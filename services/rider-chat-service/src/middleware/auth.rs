// JWT-Only Authentication untuk Rider Chat Service

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use shared::utils::jwt::{self, JwtError};

use crate::{config::AppConfig, error::AppError};

/// User yang sudah terautentikasi. `user_id` sama dengan key di `users/{id}`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub email: Option<String>,
    pub role: String,
}

// Axum extractor implementation untuk AuthUser
impl<S> FromRequestParts<S> for AuthUser
where
    AppConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                AppError::unauthorized("Authorization header dengan Bearer token diperlukan")
            })?;

        let config = AppConfig::from_ref(state);

        let claims = jwt::validate_token(bearer.token(), &config.jwt_secret).map_err(|e| match e {
            // Role lain valid secara token, tapi tidak boleh akses chat
            JwtError::InvalidRole => {
                AppError::forbidden("Hanya rider dan driver yang bisa akses chat")
            }
            JwtError::MissingSecret => {
                AppError::internal("JWT secret belum dikonfigurasi")
            }
            _ => AppError::unauthorized("Token tidak valid atau sudah expired"),
        })?;

        tracing::debug!(
            "User authenticated - ID: {}, Role: {}",
            claims.sub,
            claims.role
        );

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}
