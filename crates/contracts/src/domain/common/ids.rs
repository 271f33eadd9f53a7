//! Record identifier namespace
//!
//! Server ids are positive integers assigned by the backend. Draft ids are
//! issued by a per-session monotonic counter and live in their own enum
//! variant, so the two namespaces can never collide (no wall-clock ids).

use serde::{Deserialize, Serialize};

/// Synthetic id of a not-yet-persisted child record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DraftId(pub u64);

impl DraftId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for DraftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "draft:{}", self.0)
    }
}

/// Either a server-assigned id or a session-local draft id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum RecordId {
    Server(i64),
    Draft(DraftId),
}

impl RecordId {
    pub fn server(&self) -> Option<i64> {
        match self {
            Self::Server(id) => Some(*id),
            Self::Draft(_) => None,
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft(_))
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self::Server(id)
    }
}

impl From<DraftId> for RecordId {
    fn from(id: DraftId) -> Self {
        Self::Draft(id)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Server(id) => write!(f, "{}", id),
            Self::Draft(id) => write!(f, "{}", id),
        }
    }
}
