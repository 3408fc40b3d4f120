use thiserror::Error;

/// Violations of the conversation invariants.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("conversation must start with exactly one system turn")]
    MissingSystemTurn,

    #[error("unexpected system turn at index {index}")]
    UnexpectedSystemTurn { index: usize },

    #[error("loading turn at index {index} cannot be persisted")]
    LoadingTurnPresent { index: usize },

    #[error("a loading turn is already present")]
    DuplicateLoading,

    #[error("system turns cannot be appended")]
    SystemTurnAppended,
}

/// Errors from the remote assistant endpoint.
///
/// These never reach the user: the dispatcher folds every variant into the
/// fallback reply and only logs the cause.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("unexpected reply role: '{0}'")]
    UnexpectedRole(String),
}

/// Errors from repository and key-value store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_error_display() {
        let err = ConversationError::UnexpectedSystemTurn { index: 3 };
        assert_eq!(err.to_string(), "unexpected system turn at index 3");
    }

    #[test]
    fn test_assistant_error_display() {
        let err = AssistantError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("bad gateway"));
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
