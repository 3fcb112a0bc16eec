use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One uploaded document's extracted text, addressable by handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque unguessable handle, fixed at creation.
    pub id: String,
    /// Normalized extracted text.
    pub text: String,
    /// Original filename of the upload.
    pub source_name: String,
    pub created_at: DateTime<Utc>,
    /// Updated on each successful get. Observability only: expiry is
    /// measured from `created_at`, never from here.
    pub last_accessed: DateTime<Utc>,
}

impl Session {
    pub fn new(text: impl Into<String>, source_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            source_name: source_name.into(),
            created_at: now,
            last_accessed: now,
        }
    }

    /// Character count of the stored text.
    pub fn text_length(&self) -> usize {
        self.text.chars().count()
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session(id={}, source={})", self.id, self.source_name)
    }
}
