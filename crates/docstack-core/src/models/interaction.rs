use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fixed set of observable actions against a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    Viewed,
    Downloaded,
    Sent,
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InteractionMode::Viewed => "viewed",
            InteractionMode::Downloaded => "downloaded",
            InteractionMode::Sent => "sent",
        };
        f.write_str(s)
    }
}

/// Who performed an interaction: an authenticated user or an anonymous
/// session. Exactly one identity, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    User(Uuid),
    Session(String),
}

impl Actor {
    /// Resolve an actor from what the auth/session collaborator knows about
    /// the current request. An authenticated user takes precedence over a
    /// session key when both are present.
    pub fn resolve(user_id: Option<Uuid>, session_key: Option<String>) -> Option<Actor> {
        match (user_id, session_key) {
            (Some(user_id), _) => Some(Actor::User(user_id)),
            (None, Some(key)) => Some(Actor::Session(key)),
            (None, None) => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Actor::Session(_))
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::User(id) => write!(f, "user {}", id),
            Actor::Session(key) => write!(f, "session {}", key),
        }
    }
}

/// One observed view/download/send event. Append-only: created once per
/// event, never mutated or deleted by this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub id: Uuid,
    pub document_id: Uuid,
    pub mode: InteractionMode,
    pub user_id: Option<Uuid>,
    pub session_key: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Interaction {
    pub fn new(document_id: Uuid, mode: InteractionMode, actor: &Actor) -> Self {
        let (user_id, session_key) = match actor {
            Actor::User(id) => (Some(*id), None),
            Actor::Session(key) => (None, Some(key.clone())),
        };
        Self {
            id: Uuid::new_v4(),
            document_id,
            mode,
            user_id,
            session_key,
            timestamp: Utc::now(),
        }
    }

    // Per-mode constructors; each stamps its mode unconditionally.

    pub fn viewed(document_id: Uuid, actor: &Actor) -> Self {
        Self::new(document_id, InteractionMode::Viewed, actor)
    }

    pub fn downloaded(document_id: Uuid, actor: &Actor) -> Self {
        Self::new(document_id, InteractionMode::Downloaded, actor)
    }

    pub fn sent(document_id: Uuid, actor: &Actor) -> Self {
        Self::new(document_id, InteractionMode::Sent, actor)
    }

    /// True when this record belongs to the given actor. Anonymous actors
    /// match by strict session-key equality only.
    pub fn matches_actor(&self, actor: &Actor) -> bool {
        match actor {
            Actor::User(id) => self.user_id == Some(*id),
            Actor::Session(key) => self.session_key.as_deref() == Some(key.as_str()),
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actor = match (&self.user_id, &self.session_key) {
            (Some(id), _) => format!("user {}", id),
            (None, Some(key)) => format!("session {}", key),
            (None, None) => "unknown".to_string(),
        };
        write!(
            f,
            "{} {} by {} on {}",
            self.document_id,
            self.mode,
            actor,
            self.timestamp.date_naive()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_authenticated_user() {
        let user_id = Uuid::new_v4();
        let actor = Actor::resolve(Some(user_id), Some("sess-1".to_string())).unwrap();
        assert_eq!(actor, Actor::User(user_id));
        assert!(!actor.is_anonymous());
    }

    #[test]
    fn test_resolve_falls_back_to_session() {
        let actor = Actor::resolve(None, Some("sess-1".to_string())).unwrap();
        assert_eq!(actor, Actor::Session("sess-1".to_string()));
        assert!(actor.is_anonymous());
    }

    #[test]
    fn test_resolve_nothing() {
        assert!(Actor::resolve(None, None).is_none());
    }

    #[test]
    fn test_new_fills_exactly_one_identity() {
        let document_id = Uuid::new_v4();
        let user = Actor::User(Uuid::new_v4());
        let by_user = Interaction::viewed(document_id, &user);
        assert!(by_user.user_id.is_some());
        assert!(by_user.session_key.is_none());

        let session = Actor::Session("sess-2".to_string());
        let by_session = Interaction::viewed(document_id, &session);
        assert!(by_session.user_id.is_none());
        assert_eq!(by_session.session_key.as_deref(), Some("sess-2"));
    }

    #[test]
    fn test_per_mode_constructors_stamp_their_mode() {
        let document_id = Uuid::new_v4();
        let actor = Actor::Session("s".to_string());
        assert_eq!(
            Interaction::viewed(document_id, &actor).mode,
            InteractionMode::Viewed
        );
        assert_eq!(
            Interaction::downloaded(document_id, &actor).mode,
            InteractionMode::Downloaded
        );
        assert_eq!(
            Interaction::sent(document_id, &actor).mode,
            InteractionMode::Sent
        );
    }

    #[test]
    fn test_matches_actor_strict_session_equality() {
        let document_id = Uuid::new_v4();
        let record = Interaction::viewed(document_id, &Actor::Session("abc".to_string()));
        assert!(record.matches_actor(&Actor::Session("abc".to_string())));
        assert!(!record.matches_actor(&Actor::Session("abd".to_string())));
        assert!(!record.matches_actor(&Actor::User(Uuid::new_v4())));
    }

    #[test]
    fn test_display_mentions_mode_and_actor() {
        let record = Interaction::downloaded(Uuid::new_v4(), &Actor::Session("k1".to_string()));
        let shown = record.to_string();
        assert!(shown.contains("downloaded"));
        assert!(shown.contains("session k1"));
    }
}
