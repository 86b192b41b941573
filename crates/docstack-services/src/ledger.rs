//! Interaction ledger
//!
//! Append-only record of who viewed, downloaded, or sent a document, plus
//! the "already interacted" dedup query. Each observed event appends exactly
//! one record; the policy of when to skip a duplicate belongs to the caller.

use std::sync::Arc;

use docstack_core::models::{Actor, Interaction, InteractionMode};
use docstack_core::AppError;
use docstack_store::InteractionStore;
use uuid::Uuid;

pub struct InteractionLedger {
    interactions: Arc<dyn InteractionStore>,
}

impl InteractionLedger {
    pub fn new(interactions: Arc<dyn InteractionStore>) -> Self {
        Self { interactions }
    }

    /// Append one interaction with an explicit mode.
    pub async fn record(
        &self,
        document_id: Uuid,
        mode: InteractionMode,
        actor: &Actor,
    ) -> Result<Interaction, AppError> {
        let interaction = Interaction::new(document_id, mode, actor);

        tracing::debug!(
            document_id = %document_id,
            mode = %mode,
            actor = %actor,
            "Recording interaction"
        );

        self.interactions
            .append(interaction)
            .await
            .map_err(AppError::from)
    }

    // Per-mode entry points. Each stamps its own mode; there is no way for
    // a caller to record a download as anything but a download.

    pub async fn record_view(
        &self,
        document_id: Uuid,
        actor: &Actor,
    ) -> Result<Interaction, AppError> {
        self.record(document_id, InteractionMode::Viewed, actor).await
    }

    pub async fn record_download(
        &self,
        document_id: Uuid,
        actor: &Actor,
    ) -> Result<Interaction, AppError> {
        self.record(document_id, InteractionMode::Downloaded, actor)
            .await
    }

    pub async fn record_send(
        &self,
        document_id: Uuid,
        actor: &Actor,
    ) -> Result<Interaction, AppError> {
        self.record(document_id, InteractionMode::Sent, actor).await
    }

    /// True iff this actor has already interacted with the document in the
    /// given mode. Anonymous actors match by strict session-key equality.
    pub async fn has_already(
        &self,
        document_id: Uuid,
        mode: InteractionMode,
        actor: &Actor,
    ) -> Result<bool, AppError> {
        self.interactions
            .exists(document_id, mode, actor)
            .await
            .map_err(AppError::from)
    }

    /// Full interaction history for a document, in append order.
    pub async fn history(&self, document_id: Uuid) -> Result<Vec<Interaction>, AppError> {
        self.interactions
            .list_for_document(document_id)
            .await
            .map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstack_store::MemoryInteractionStore;

    fn ledger_with_store() -> (InteractionLedger, Arc<MemoryInteractionStore>) {
        let store = Arc::new(MemoryInteractionStore::new());
        (InteractionLedger::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_double_record_appends_two_then_has_already() {
        let (ledger, store) = ledger_with_store();
        let document_id = Uuid::new_v4();
        let actor = Actor::Session("sess-1".to_string());

        assert!(!ledger
            .has_already(document_id, InteractionMode::Viewed, &actor)
            .await
            .unwrap());

        ledger.record_view(document_id, &actor).await.unwrap();
        ledger.record_view(document_id, &actor).await.unwrap();

        assert_eq!(store.len().await, 2);
        assert!(ledger
            .has_already(document_id, InteractionMode::Viewed, &actor)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_other_session_has_not_already() {
        let (ledger, _) = ledger_with_store();
        let document_id = Uuid::new_v4();

        ledger
            .record_view(document_id, &Actor::Session("sess-1".to_string()))
            .await
            .unwrap();

        assert!(!ledger
            .has_already(
                document_id,
                InteractionMode::Viewed,
                &Actor::Session("sess-2".to_string())
            )
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_modes_are_tracked_separately() {
        let (ledger, _) = ledger_with_store();
        let document_id = Uuid::new_v4();
        let actor = Actor::User(Uuid::new_v4());

        ledger.record_download(document_id, &actor).await.unwrap();

        assert!(ledger
            .has_already(document_id, InteractionMode::Downloaded, &actor)
            .await
            .unwrap());
        assert!(!ledger
            .has_already(document_id, InteractionMode::Viewed, &actor)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_per_mode_entry_points_force_their_mode() {
        let (ledger, _) = ledger_with_store();
        let document_id = Uuid::new_v4();
        let actor = Actor::Session("s".to_string());

        let recorded = ledger.record_download(document_id, &actor).await.unwrap();
        assert_eq!(recorded.mode, InteractionMode::Downloaded);

        let recorded = ledger.record_send(document_id, &actor).await.unwrap();
        assert_eq!(recorded.mode, InteractionMode::Sent);
    }

    #[tokio::test]
    async fn test_history_in_append_order() {
        let (ledger, _) = ledger_with_store();
        let document_id = Uuid::new_v4();
        let actor = Actor::Session("s".to_string());

        ledger.record_view(document_id, &actor).await.unwrap();
        ledger.record_download(document_id, &actor).await.unwrap();

        let history = ledger.history(document_id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].mode, InteractionMode::Viewed);
        assert_eq!(history[1].mode, InteractionMode::Downloaded);
    }
}
