use shared::utils::http_client::HttpClientError;
use thiserror::Error;

/// Errors yang dihasilkan oleh store layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store tidak bisa dihubungi (network / service down).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Request ke store melewati batas waktu.
    #[error("Store request timed out")]
    Timeout,

    /// Store menolak request (auth, rules, quota).
    #[error("Store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Response atau document tidak sesuai bentuk yang diharapkan.
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// Path mengandung karakter yang tidak valid.
    #[error("Invalid store path: {0}")]
    InvalidPath(String),
}

impl From<HttpClientError> for StoreError {
    fn from(err: HttpClientError) -> Self {
        match err {
            HttpClientError::Timeout => StoreError::Timeout,
            HttpClientError::ServiceUnavailable(msg) | HttpClientError::RequestFailed(msg) => {
                StoreError::Unavailable(msg)
            }
            HttpClientError::ParseError(msg) => StoreError::Malformed(msg),
            HttpClientError::Unauthorized(msg) => StoreError::Rejected {
                status: 401,
                message: msg,
            },
            HttpClientError::Status { status, body } => StoreError::Rejected {
                status,
                message: body,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_errors_map_to_store_errors() {
        assert!(matches!(
            StoreError::from(HttpClientError::Timeout),
            StoreError::Timeout
        ));
        assert!(matches!(
            StoreError::from(HttpClientError::ServiceUnavailable("down".into())),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            StoreError::from(HttpClientError::Status {
                status: 503,
                body: "busy".into()
            }),
            StoreError::Rejected { status: 503, .. }
        ));
        assert!(matches!(
            StoreError::from(HttpClientError::ParseError("eof".into())),
            StoreError::Malformed(_)
        ));
    }
}
