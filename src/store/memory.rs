//! In-memory record store
//!
//! Keeps the serialized text in a `String`. Useful for front ends that do
//! not persist anything and for tests that need the exact persisted text.

use crate::codec::{self, LoadOutcome, MalformedLinePolicy};
use crate::error::Result;
use crate::models::Employee;
use crate::store::RecordStore;

/// Record store backed by an in-memory serialized text
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    text: String,
    policy: MalformedLinePolicy,
    saves: usize,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding already-serialized text
    #[must_use]
    pub fn with_text(text: impl Into<String>, policy: MalformedLinePolicy) -> Self {
        Self {
            text: text.into(),
            policy,
            saves: 0,
        }
    }

    /// Current serialized text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of completed saves
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<LoadOutcome> {
        codec::deserialize(&self.text, self.policy)
    }

    fn save(&mut self, records: &[Employee]) -> Result<()> {
        self.text = codec::serialize(records);
        self.saves += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory store".to_string()
    }
}
