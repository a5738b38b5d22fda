use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use thiserror::Error;

use crate::models::claims::TokenClaims;

#[derive(Debug, Error, PartialEq)]
pub enum JwtError {
    #[error("Token invalid atau expired")]
    InvalidToken,

    #[error("JWT secret tidak ditemukan")]
    MissingSecret,

    #[error("Token type tidak valid untuk endpoint ini")]
    InvalidTokenType,

    #[error("Role tidak valid untuk chat")]
    InvalidRole,
}

/// Validate JWT token (HS256) dan extract claims.
///
/// Hanya access token dengan role rider/driver yang diterima.
pub fn validate_token(token: &str, secret: &str) -> Result<TokenClaims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| JwtError::InvalidToken)?;

    let claims = token_data.claims;

    // Pastikan token adalah access token, bukan refresh token
    if !claims.is_access_token() {
        return Err(JwtError::InvalidTokenType);
    }

    if !claims.can_access_chat() {
        return Err(JwtError::InvalidRole);
    }

    tracing::debug!("JWT validation successful for user: {} ({})", claims.sub, claims.role);

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    const SECRET: &str = "test-secret-key-for-testing";

    fn claims(role: &str, token_type: &str) -> TokenClaims {
        TokenClaims {
            sub: "uid-1".to_string(),
            email: Some("rider@test.com".to_string()),
            role: role.to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iat: Utc::now().timestamp(),
            token_type: token_type.to_string(),
        }
    }

    fn sign(claims: &TokenClaims) -> String {
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            claims,
            &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_validate_rider_token() {
        let token = sign(&claims("rider", "access"));

        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "uid-1");
        assert!(claims.is_rider());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign(&claims("driver", "access"));
        assert_eq!(
            validate_token(&token, "another-secret").unwrap_err(),
            JwtError::InvalidToken
        );
    }

    #[test]
    fn test_empty_secret_rejected() {
        let token = sign(&claims("driver", "access"));
        assert_eq!(validate_token(&token, "").unwrap_err(), JwtError::MissingSecret);
    }

    #[test]
    fn test_invalid_role_token() {
        let token = sign(&claims("admin", "access"));
        assert_eq!(validate_token(&token, SECRET).unwrap_err(), JwtError::InvalidRole);
    }

    #[test]
    fn test_invalid_token_type() {
        let token = sign(&claims("rider", "refresh"));
        assert_eq!(
            validate_token(&token, SECRET).unwrap_err(),
            JwtError::InvalidTokenType
        );
    }
}
