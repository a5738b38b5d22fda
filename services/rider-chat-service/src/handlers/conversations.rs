// Conversation Handlers untuk Rider Chat Service
use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::{
    config::AppState,
    domain::conversation::{
        ConversationDetailResponse, ConversationResponse, ConversationSummary,
        CreateConversationRequest,
    },
    error::AppError,
    middleware::AuthUser,
};

// Resolve conversation dengan driver, buat baru kalau belum ada
#[utoipa::path(
    post,
    path = "/api/conversations",
    tag = "conversations",
    security(("bearer_auth" = [])),
    request_body = CreateConversationRequest,
    responses(
        (status = 200, description = "Conversation ditemukan atau dibuat", body = ConversationResponse),
        (status = 400, description = "Request tidak valid"),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Store tidak bisa diakses")
    )
)]
pub async fn create_conversation(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateConversationRequest>,
) -> Result<Json<ConversationResponse>, AppError> {
    let chat_id = state
        .chat
        .resolve_or_create_conversation(&user.user_id, &request.driver_id)
        .await?;

    tracing::info!(
        "{} {} membuka chat {} dengan {}",
        user.role,
        user.user_id,
        chat_id,
        request.driver_id
    );

    Ok(Json(ConversationResponse {
        chat_id,
        driver_id: request.driver_id,
        user_id: user.user_id,
    }))
}

// Ambil semua conversation user yang sudah punya pesan
#[utoipa::path(
    get,
    path = "/api/conversations",
    tag = "conversations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Daftar conversation berhasil diambil", body = [ConversationSummary]),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Store tidak bisa diakses")
    )
)]
pub async fn get_user_conversations(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ConversationSummary>>, AppError> {
    let summaries = state.chat.list_conversations_for(&user.user_id).await?;
    Ok(Json(summaries))
}

// Ambil detail conversation, hanya untuk participant
#[utoipa::path(
    get,
    path = "/api/conversations/{conversation_id}",
    tag = "conversations",
    security(("bearer_auth" = [])),
    params(
        ("conversation_id" = String, Path, description = "Conversation ID")
    ),
    responses(
        (status = 200, description = "Conversation ditemukan", body = ConversationDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Bukan participant conversation"),
        (status = 404, description = "Conversation tidak ditemukan")
    )
)]
pub async fn get_conversation_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(conversation_id): Path<String>,
) -> Result<Json<ConversationDetailResponse>, AppError> {
    let chat_data = state
        .chat
        .get_conversation(&conversation_id, &user.user_id)
        .await?;

    Ok(Json(ConversationDetailResponse {
        chat_id: conversation_id,
        chat_data,
    }))
}

// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health check", body = crate::config::HealthCheckResponse)
    )
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> Json<crate::config::HealthCheckResponse> {
    Json(state.health_check().await)
}
