use serde::{Deserialize, Serialize};

/// Result of a composer operation
pub type ComposerResult<T> = Result<T, ComposerError>;

/// Engine-wide error, carried across the orchestrator boundary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComposerError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl ComposerError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    /// Secondary-step commit attempted before the primary entity exists
    pub fn missing_parent(category: &str) -> Self {
        Self::new(
            "MISSING_PARENT_ID",
            format!("no parent id for category '{}'", category),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    /// Error reported by a collaborator endpoint; `message` is the server
    /// message when one was present in the response body
    pub fn external(message: impl Into<String>) -> Self {
        Self::new("EXTERNAL_ERROR", message)
    }

    pub fn is_missing_parent(&self) -> bool {
        self.code == "MISSING_PARENT_ID"
    }
}

impl std::fmt::Display for ComposerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ComposerError {}

impl From<anyhow::Error> for ComposerError {
    fn from(err: anyhow::Error) -> Self {
        ComposerError::internal(err.to_string())
    }
}

impl From<serde_json::Error> for ComposerError {
    fn from(err: serde_json::Error) -> Self {
        ComposerError::internal(format!("JSON error: {}", err))
    }
}
