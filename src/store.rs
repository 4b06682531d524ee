use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One recorded human/AI exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub timestamp: DateTime<Utc>,
    pub human: String,
    pub ai: String,
}

/// Storage interface for the conversation history, so the pipeline never
/// names the backing format.
pub trait ConversationStore {
    /// Full history, oldest first. An absent store is an empty history.
    async fn load(&self) -> Result<Vec<Turn>>;

    /// Records one exchange, stamped with the current UTC time.
    async fn append(&self, human: &str, ai: &str) -> Result<()>;
}

/// Single-file JSON store. Every append rewrites the whole list; concurrent
/// writers race and the last full rewrite wins.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConversationStore for FileStore {
    async fn load(&self) -> Result<Vec<Turn>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = tokio::fs::read_to_string(&self.path).await?;
        serde_json::from_str(&contents).map_err(Error::MalformedStore)
    }

    async fn append(&self, human: &str, ai: &str) -> Result<()> {
        let mut turns = self.load().await?;
        turns.push(Turn {
            timestamp: Utc::now(),
            human: human.to_owned(),
            ai: ai.to_owned(),
        });

        let serialized = serde_json::to_string_pretty(&turns)?;
        tokio::fs::write(&self.path, serialized).await?;

        tracing::debug!(turns = turns.len(), path = %self.path.display(), "persisted conversation history");
        Ok(())
    }
}
