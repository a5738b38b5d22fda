use futures::stream::{self, StreamExt};
use shared::utils::validation::is_valid_store_key;

use super::{validate_user_id, ChatService};
use crate::domain::{Conversation, ConversationSummary, UNKNOWN_USER};
use crate::error::AppError;

impl ChatService {
    /// List conversation yang diikuti user dan sudah punya minimal satu pesan.
    ///
    /// Urutan hasil mengikuti urutan iterasi store. Lookup nama participant
    /// lain berjalan bersamaan (dibatasi `lookup_concurrency`), dan kegagalan
    /// lookup hanya membuat nama jadi "Unknown User".
    pub async fn list_conversations_for(
        &self,
        user_id: &str,
    ) -> Result<Vec<ConversationSummary>, AppError> {
        validate_user_id(user_id, "userId")?;

        let conversations = self.conversations.list_all().await?;

        let candidates: Vec<(String, Option<String>, String)> = conversations
            .into_iter()
            .filter(|(_, conversation)| conversation.is_participant(user_id))
            .filter_map(|(chat_id, conversation)| {
                let last_message = conversation
                    .last_message()
                    .map(ConversationSummary::last_message_text)?;
                let other_user_id = conversation
                    .other_participant_id(user_id)
                    .map(str::to_string);
                Some((chat_id, other_user_id, last_message))
            })
            .collect();

        // buffered() menjaga urutan hasil sesuai urutan input
        let summaries: Vec<ConversationSummary> = stream::iter(candidates)
            .map(|(chat_id, other_user_id, last_message)| async move {
                let other_user_name = self.display_name_for(other_user_id.as_deref()).await;
                ConversationSummary {
                    chat_id,
                    other_user_id,
                    other_user_name,
                    last_message,
                }
            })
            .buffered(self.lookup_concurrency)
            .collect()
            .await;

        tracing::info!(
            "User {} retrieved {} conversations",
            user_id,
            summaries.len()
        );

        Ok(summaries)
    }

    /// Ambil satu conversation, hanya untuk participant-nya.
    pub async fn get_conversation(
        &self,
        conversation_id: &str,
        user_id: &str,
    ) -> Result<Conversation, AppError> {
        validate_user_id(conversation_id, "conversationId")?;

        let conversation = self
            .conversations
            .get(conversation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Conversation tidak ditemukan"))?;

        if !conversation.is_participant(user_id) {
            tracing::warn!(
                "User {} mencoba akses conversation {} tanpa izin",
                user_id,
                conversation_id
            );
            return Err(AppError::forbidden(
                "Anda tidak memiliki akses ke conversation ini",
            ));
        }

        Ok(conversation)
    }

    // Nama tampilan user, tidak pernah gagal
    pub(crate) async fn display_name_for(&self, user_id: Option<&str>) -> String {
        let Some(user_id) = user_id else {
            tracing::warn!("No user ID provided for name lookup");
            return UNKNOWN_USER.to_string();
        };

        if !is_valid_store_key(user_id) {
            tracing::warn!("User ID {:?} tidak bisa dipakai sebagai key", user_id);
            return UNKNOWN_USER.to_string();
        }

        match self.users.get_profile(user_id).await {
            Ok(Some(profile)) => profile.display_name().unwrap_or(UNKNOWN_USER).to_string(),
            Ok(None) => {
                tracing::warn!("User {} does not exist", user_id);
                UNKNOWN_USER.to_string()
            }
            Err(e) => {
                tracing::warn!("Error fetching user name for {}: {}", user_id, e);
                UNKNOWN_USER.to_string()
            }
        }
    }
}
