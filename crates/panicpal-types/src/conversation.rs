//! Turn and conversation types for PanicPal.
//!
//! A conversation is an ordered list of turns. The first turn is always the
//! single `System` turn carrying the assistant's instructions; user and
//! assistant turns follow in insertion order (newest last).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConversationError;

/// Role of a turn in the conversation.
///
/// `Loading` is a local pseudo-role for the "thinking" indicator. It is never
/// sent to the assistant endpoint and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Loading,
}

impl Role {
    /// Whether the UI draws this role on the assistant's side of the chat.
    pub fn renders_as_assistant(&self) -> bool {
        match self {
            Role::Assistant | Role::Loading => true,
            Role::System | Role::User => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::Loading => write!(f, "loading"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "loading" => Ok(Role::Loading),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// A single unit of conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn loading(content: impl Into<String>) -> Self {
        Self::new(Role::Loading, content)
    }
}

/// A validated, persistable conversation.
///
/// Guarantees:
/// - index 0 is the only `System` turn;
/// - no `Loading` turn is present.
///
/// This is the shape written to durable storage and the shape a fresh load
/// produces. The live list (which may hold a `Loading` turn) is owned by the
/// conversation store in `panicpal-core`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Start a fresh conversation holding only the system turn.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::system(system_prompt)],
        }
    }

    /// Build a conversation from an ordered turn list, checking the invariants.
    pub fn from_turns(turns: Vec<Turn>) -> Result<Self, ConversationError> {
        match turns.first() {
            Some(first) if first.role == Role::System => {}
            _ => return Err(ConversationError::MissingSystemTurn),
        }

        for (index, turn) in turns.iter().enumerate().skip(1) {
            match turn.role {
                Role::System => return Err(ConversationError::UnexpectedSystemTurn { index }),
                Role::Loading => return Err(ConversationError::LoadingTurnPresent { index }),
                Role::User | Role::Assistant => {}
            }
        }

        Ok(Self { turns })
    }

    /// Append a user or assistant turn.
    pub fn push(&mut self, turn: Turn) -> Result<(), ConversationError> {
        match turn.role {
            Role::System => Err(ConversationError::SystemTurnAppended),
            Role::Loading => Err(ConversationError::LoadingTurnPresent {
                index: self.turns.len(),
            }),
            Role::User | Role::Assistant => {
                self.turns.push(turn);
                Ok(())
            }
        }
    }

    /// All turns, system turn first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Turns shown to the user (everything after the system turn).
    pub fn history(&self) -> &[Turn] {
        &self.turns[1..]
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// A conversation always holds its system turn, so it is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn into_turns(self) -> Vec<Turn> {
        self.turns
    }
}

impl<'de> Deserialize<'de> for Conversation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let turns = Vec::<Turn>::deserialize(deserializer)?;
        Conversation::from_turns(turns).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::System, Role::User, Role::Assistant, Role::Loading] {
            let s = role.to_string();
            let parsed: Role = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, Role::User);
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!("narrator".parse::<Role>().is_err());
        assert!(serde_json::from_str::<Role>("\"narrator\"").is_err());
    }

    #[test]
    fn test_role_rendering() {
        assert!(Role::Loading.renders_as_assistant());
        assert!(Role::Assistant.renders_as_assistant());
        assert!(!Role::User.renders_as_assistant());
    }

    #[test]
    fn test_turn_wire_shape() {
        let json = serde_json::to_value(Turn::user("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn test_new_conversation_holds_system_turn() {
        let conv = Conversation::new("be kind");
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.turns()[0], Turn::system("be kind"));
        assert!(conv.history().is_empty());
    }

    #[test]
    fn test_from_turns_requires_leading_system() {
        let err = Conversation::from_turns(vec![Turn::user("hi")]).unwrap_err();
        assert!(matches!(err, ConversationError::MissingSystemTurn));

        let err = Conversation::from_turns(Vec::new()).unwrap_err();
        assert!(matches!(err, ConversationError::MissingSystemTurn));
    }

    #[test]
    fn test_from_turns_rejects_second_system() {
        let err = Conversation::from_turns(vec![
            Turn::system("a"),
            Turn::user("hi"),
            Turn::system("b"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConversationError::UnexpectedSystemTurn { index: 2 }));
    }

    #[test]
    fn test_from_turns_rejects_loading() {
        let err = Conversation::from_turns(vec![Turn::system("a"), Turn::loading("...")])
            .unwrap_err();
        assert!(matches!(err, ConversationError::LoadingTurnPresent { index: 1 }));
    }

    #[test]
    fn test_push_keeps_invariants() {
        let mut conv = Conversation::new("s");
        conv.push(Turn::user("hi")).unwrap();
        conv.push(Turn::assistant("hello")).unwrap();
        assert_eq!(conv.len(), 3);

        assert!(matches!(
            conv.push(Turn::system("again")),
            Err(ConversationError::SystemTurnAppended)
        ));
        assert!(matches!(
            conv.push(Turn::loading("...")),
            Err(ConversationError::LoadingTurnPresent { index: 3 })
        ));
        assert_eq!(conv.len(), 3);
    }

    #[test]
    fn test_serde_is_plain_array() {
        let conv = Conversation::from_turns(vec![
            Turn::system("s"),
            Turn::user("hi"),
            Turn::assistant("hello"),
        ])
        .unwrap();

        let json = serde_json::to_string(&conv).unwrap();
        assert_eq!(
            json,
            r#"[{"role":"system","content":"s"},{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}]"#
        );

        let parsed: Conversation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, conv);
    }

    #[test]
    fn test_deserialize_validates() {
        let result = serde_json::from_str::<Conversation>(r#"[{"role":"user","content":"hi"}]"#);
        assert!(result.is_err());
    }
}
