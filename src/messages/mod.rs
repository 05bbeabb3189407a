//! Broadcast messages exchanged between game objects.
//!
//! Messages are plain data records delivered synchronously by the
//! [`GameObjectManager`](crate::gameobject::manager::GameObjectManager)
//! within the broadcasting frame; they are never queued or persisted. Each
//! kind is one enum variant, so a message is a stack value that behaviours
//! preallocate once and reuse across broadcasts.
//!
//! Behaviours opt in per kind via
//! [`Behaviour::wants_message`](crate::behaviours::Behaviour::wants_message);
//! a kind nobody registered for simply reaches nobody.

use crate::gameobject::GameObjectId;
use crate::gameobject::definition::Classification;

/// Identity of a message, used for handler opt-in checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// The match is being (re)started from the main menu.
    GameRestart,
    /// A rally ended and somebody scored.
    ScorePoint,
}

/// Payload for [`MessageKind::GameRestart`]. Carries no data; the event
/// itself is the signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnGameRestart;

/// Payload for [`MessageKind::ScorePoint`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OnScorePoint {
    /// Points awarded for the rally.
    pub amount: i32,
}

/// A broadcastable message. Handlers receive it mutably so request-style
/// kinds can write reply fields in place.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    GameRestart(OnGameRestart),
    ScorePoint(OnScorePoint),
}

impl Message {
    /// The kind tag used for handler opt-in.
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::GameRestart(_) => MessageKind::GameRestart,
            Message::ScorePoint(_) => MessageKind::ScorePoint,
        }
    }
}

/// Scopes delivery of a broadcast.
///
/// `All` fans out to every live object; `Object` delivers to exactly one
/// (same call shape as a broadcast, disambiguated here); `Classification`
/// reaches every object carrying the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFilter {
    All,
    Object(GameObjectId),
    Classification(Classification),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let restart = Message::GameRestart(OnGameRestart);
        let score = Message::ScorePoint(OnScorePoint { amount: 2 });
        assert_eq!(restart.kind(), MessageKind::GameRestart);
        assert_eq!(score.kind(), MessageKind::ScorePoint);
    }
}
