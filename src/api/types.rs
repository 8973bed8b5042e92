//! Shared state for the API layer.

use std::sync::Arc;

use crate::config::Settings;
use crate::llm::OpenAiClient;
use crate::pipeline::MeetingPipeline;
use crate::storage::{MeetingStore, StorageError};

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<MeetingStore>,
    pub pipeline: Arc<MeetingPipeline>,
}

impl ApiContext {
    /// Build the production context: filesystem-backed store plus the
    /// OpenAI-compatible generation client.
    pub fn from_settings(settings: &Settings) -> Result<Self, StorageError> {
        let store = MeetingStore::open(settings)?;
        let generator = OpenAiClient::from_settings(settings);
        Ok(Self {
            store: Arc::new(store),
            pipeline: Arc::new(MeetingPipeline::new(Box::new(generator))),
        })
    }
}
