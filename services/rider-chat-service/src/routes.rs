// API Routes untuk Rider Chat Service dengan JWT-Only architecture

use crate::config::AppState;
use crate::handlers::{conversations, requests};
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

// OpenAPI Documentation untuk Rider Chat Service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rider Chat Service API",
        version = "1.0.0",
        description = "Chat antara rider dan driver\n\n## Features\n\n- Resolve-or-create conversation per pasangan user\n- Daftar conversation dengan nama lawan bicara dan pesan terakhir\n- Ride request ke driver\n- JWT-Only authentication",
    ),
    paths(
        conversations::create_conversation,
        conversations::get_user_conversations,
        conversations::get_conversation_by_id,
        conversations::health_check,
        requests::send_ride_request,
    ),
    components(
        schemas(
            crate::domain::Conversation,
            crate::domain::Message,
            crate::domain::ConversationSummary,
            crate::domain::CreateConversationRequest,
            crate::domain::ConversationResponse,
            crate::domain::ConversationDetailResponse,
            crate::domain::RideRequest,
            crate::domain::RideRequestResponse,
            crate::config::HealthCheckResponse,
        )
    ),
    tags(
        (name = "conversations", description = "Conversation rider dan driver"),
        (name = "requests", description = "Ride request ke driver"),
        (name = "health", description = "Service health")
    ),
    modifiers(&SecurityAddon),
    security(
        ("bearer_auth" = [])
    )
)]
pub struct ApiDoc;

// Security scheme modifier untuk Bearer JWT authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

// Security headers middleware
async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );

    response
}

// CORS dari FRONTEND_URL, semua origin kalau tidak diset
fn cors_layer(frontend_url: Option<&str>) -> Result<CorsLayer, String> {
    let origin = match frontend_url {
        Some(url) => {
            let value = url
                .parse::<HeaderValue>()
                .map_err(|_| format!("FRONTEND_URL harus valid URL format: {}", url))?;
            AllowOrigin::exact(value)
        }
        None => AllowOrigin::from(Any),
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)))
}

// Buat router dengan JWT-only security
pub fn create_router(state: AppState) -> Result<Router, String> {
    let cors = cors_layer(state.config.frontend_url.as_deref())?;

    if state.config.frontend_url.is_none() {
        tracing::warn!("FRONTEND_URL tidak diset, CORS mengizinkan semua origin");
    }

    // Protected API routes, AuthUser extractor di setiap handler
    let api_routes = Router::new()
        .route(
            "/conversations",
            post(conversations::create_conversation).get(conversations::get_user_conversations),
        )
        .route(
            "/conversations/{conversation_id}",
            get(conversations::get_conversation_by_id),
        )
        .route("/requests", post(requests::send_ride_request));

    let router = Router::new()
        .route("/health", get(conversations::health_check))
        .nest("/api", api_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .layer(axum::middleware::from_fn(security_headers_middleware));

    Ok(router)
}
