// Konfigurasi Rider Chat Service
use serde::Serialize;
use shared::utils::http_client::RealtimeDbClient;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::chat::{ChatService, DEFAULT_LOOKUP_CONCURRENCY};
use crate::store::{DocumentStore, MemoryStore, RealtimeDbStore};

const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

// Health check response structure
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthCheckResponse {
    pub service: String,
    pub status: String,
    pub version: String,
    pub store_backend: String,
    pub store: String,
    pub timestamp: String,
}

/// Backend document store yang dipakai service.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Realtime { url: String, auth: Option<String> },
    Memory,
}

// Application configuration yang di-load dari environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_backend: StoreBackend,
    pub store_timeout: Duration,
    pub lookup_concurrency: usize,
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub jwt_secret: String,
    pub frontend_url: Option<String>,
}

impl AppConfig {
    // Load semua konfigurasi dari environment variables dengan validasi
    pub fn from_env() -> Result<Self, String> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load konfigurasi dari sumber key-value apa saja.
    pub fn from_source<F>(get: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = get("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or("JWT_SECRET harus diset di environment")?;

        let environment = get("RUST_ENV").unwrap_or_else(|| "development".to_string());

        // Validasi JWT secret tidak menggunakan default value di production
        if environment == "production" && jwt_secret.contains("change-this") {
            return Err("JWT_SECRET masih menggunakan default value! Ganti dengan value yang aman untuk production".to_string());
        }

        // Default memory untuk development, production wajib realtime database
        let default_backend = if environment == "production" { "realtime" } else { "memory" };
        let backend_name = get("STORE_BACKEND").unwrap_or_else(|| default_backend.to_string());
        let store_backend = match backend_name.as_str() {
            "realtime" => {
                let url = get("REALTIME_DB_URL")
                    .filter(|s| !s.is_empty())
                    .ok_or("REALTIME_DB_URL harus diset untuk STORE_BACKEND=realtime")?;
                let auth = get("REALTIME_DB_AUTH").filter(|s| !s.is_empty());
                StoreBackend::Realtime { url, auth }
            }
            "memory" => {
                if environment == "production" {
                    return Err("STORE_BACKEND=memory tidak boleh dipakai di production".to_string());
                }
                StoreBackend::Memory
            }
            other => return Err(format!("STORE_BACKEND tidak dikenal: {}", other)),
        };

        let store_timeout = match get("STORE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| format!("STORE_TIMEOUT_SECS tidak valid: {}", raw))?,
            None => Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
        };

        let lookup_concurrency = match get("LOOKUP_CONCURRENCY") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| format!("LOOKUP_CONCURRENCY tidak valid: {}", raw))?,
            None => DEFAULT_LOOKUP_CONCURRENCY,
        };

        let server_host = get("CHAT_SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let server_port = match get("CHAT_SERVICE_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| format!("CHAT_SERVICE_PORT tidak valid: {}", raw))?,
            None => 3007,
        };

        let frontend_url = get("FRONTEND_URL").filter(|s| !s.is_empty());

        Ok(AppConfig {
            store_backend,
            store_timeout,
            lookup_concurrency,
            server_host,
            server_port,
            environment,
            jwt_secret,
            frontend_url,
        })
    }

    // Helper cek production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

// Application state yang di-share ke semua handlers
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn DocumentStore>,
    pub chat: ChatService,
}

impl axum::extract::FromRef<AppState> for AppConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl AppState {
    // Inisialisasi application state sesuai backend yang dikonfigurasi
    pub fn new(config: AppConfig) -> Result<Self, String> {
        let store: Arc<dyn DocumentStore> = match &config.store_backend {
            StoreBackend::Realtime { url, auth } => {
                let client = RealtimeDbClient::new(url, auth.clone(), config.store_timeout)
                    .map_err(|e| format!("Failed to create realtime database client: {}", e))?;
                tracing::info!("Realtime database client ready for {}", client.base_url());
                Arc::new(RealtimeDbStore::new(client))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store, data hilang saat restart");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        let chat = ChatService::new(store.clone(), config.lookup_concurrency);
        Self {
            config,
            store,
            chat,
        }
    }

    // Health check koneksi ke store
    pub async fn health_check(&self) -> HealthCheckResponse {
        let store_status = match self.store.ping().await {
            Ok(()) => "connected".to_string(),
            Err(e) => {
                tracing::warn!("Store health check failed: {}", e);
                "disconnected".to_string()
            }
        };

        let status = if store_status == "connected" {
            "healthy"
        } else {
            "degraded"
        };

        HealthCheckResponse {
            service: "rider-chat-service".to_string(),
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store_backend: self.store.backend_name().to_string(),
            store: store_status,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_realtime_backend_with_defaults() {
        let config = load(&[
            ("JWT_SECRET", "secret"),
            ("STORE_BACKEND", "realtime"),
            ("REALTIME_DB_URL", "https://rides.example.com"),
        ])
        .unwrap();

        assert_eq!(
            config.store_backend,
            StoreBackend::Realtime {
                url: "https://rides.example.com".to_string(),
                auth: None
            }
        );
        assert_eq!(config.store_timeout, Duration::from_secs(10));
        assert_eq!(config.lookup_concurrency, DEFAULT_LOOKUP_CONCURRENCY);
        assert_eq!(config.bind_address(), "0.0.0.0:3007");
        assert!(config.frontend_url.is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn test_memory_backend_and_overrides() {
        let config = load(&[
            ("JWT_SECRET", "secret"),
            ("STORE_BACKEND", "memory"),
            ("STORE_TIMEOUT_SECS", "3"),
            ("LOOKUP_CONCURRENCY", "2"),
            ("CHAT_SERVICE_HOST", "127.0.0.1"),
            ("CHAT_SERVICE_PORT", "8080"),
            ("FRONTEND_URL", "http://localhost:3000"),
        ])
        .unwrap();

        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.store_timeout, Duration::from_secs(3));
        assert_eq!(config.lookup_concurrency, 2);
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.frontend_url.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(load(&[("STORE_BACKEND", "memory")]).is_err());
        assert!(load(&[("JWT_SECRET", "secret"), ("STORE_BACKEND", "realtime")]).is_err());
        assert!(load(&[("JWT_SECRET", "secret"), ("RUST_ENV", "production")]).is_err());
        assert!(load(&[("JWT_SECRET", "secret"), ("STORE_BACKEND", "sql")]).is_err());
        assert!(load(&[
            ("JWT_SECRET", "secret"),
            ("STORE_BACKEND", "memory"),
            ("LOOKUP_CONCURRENCY", "0")
        ])
        .is_err());
        assert!(load(&[
            ("JWT_SECRET", "secret"),
            ("STORE_BACKEND", "memory"),
            ("CHAT_SERVICE_PORT", "not-a-port")
        ])
        .is_err());
        assert!(load(&[
            ("JWT_SECRET", "secret"),
            ("STORE_BACKEND", "memory"),
            ("RUST_ENV", "production")
        ])
        .is_err());
    }

    #[test]
    fn test_default_backend_outside_production_is_memory() {
        let config = load(&[("JWT_SECRET", "secret")]).unwrap();
        assert_eq!(config.store_backend, StoreBackend::Memory);
    }

    #[tokio::test]
    async fn test_health_check_memory_store() {
        let config = load(&[("JWT_SECRET", "secret"), ("STORE_BACKEND", "memory")]).unwrap();
        let state = AppState::new(config).unwrap();

        let health = state.health_check().await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.store_backend, "memory");
    }
}
