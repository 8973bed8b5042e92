use std::path::PathBuf;

use chrono::Local;
use rusqlite::Connection;

use crate::config::Settings;
use crate::db::{meetings, sqlite};
use crate::models::{MeetingData, MeetingRecord, MeetingTask, TranscriptEntry};
use crate::storage::blob::{BlobStore, FsBlobStore};
use crate::storage::{keys, StorageError};

/// Facade over blob storage and the relational store. Every persistence
/// path of the service goes through here.
///
/// Connections are opened per operation rather than shared; with WAL
/// mode that lets concurrent handlers read while one writes.
pub struct MeetingStore {
    blobs: Box<dyn BlobStore + Send + Sync>,
    db_path: PathBuf,
}

impl MeetingStore {
    pub fn new(blobs: Box<dyn BlobStore + Send + Sync>, db_path: PathBuf) -> Self {
        Self { blobs, db_path }
    }

    /// Open the store described by the settings, creating the data
    /// directory and running migrations up front.
    pub fn open(settings: &Settings) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&settings.data_dir)?;
        let store = Self::new(
            Box::new(FsBlobStore::new(settings.blobs_dir())),
            settings.database_path(),
        );
        store.open_db()?;
        Ok(store)
    }

    fn open_db(&self) -> Result<Connection, StorageError> {
        Ok(sqlite::open_database(&self.db_path)?)
    }

    /// Store an uploaded transcript and return its blob key.
    pub fn save_transcript(&self, filename: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let key = keys::transcript_key(filename);
        let content_type = mime_guess::from_path(filename).first_or_octet_stream();
        self.blobs.put(&key, bytes, content_type.essence_str())?;
        tracing::info!(key = %key, size = bytes.len(), "Transcript saved");
        Ok(key)
    }

    /// Fetch a transcript by key, returning its display name and content.
    pub fn get_transcript(&self, key: &str) -> Result<Option<(String, String)>, StorageError> {
        let Some(bytes) = self.blobs.get(key)? else {
            return Ok(None);
        };
        let content = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Some((keys::base_name(key).to_string(), content)))
    }

    /// List stored transcripts, flagging the ones a meeting record was
    /// already generated from.
    pub fn list_transcripts(&self) -> Result<Vec<TranscriptEntry>, StorageError> {
        let transcript_keys = self.blobs.list(keys::TRANSCRIPTS_PREFIX)?;
        let processed = {
            let conn = self.open_db()?;
            meetings::meeting_sources(&conn)?
        };

        let mut entries = Vec::new();
        for key in transcript_keys {
            let (size, date) = match self.blobs.metadata(&key)? {
                Some(meta) => (
                    Some(meta.size),
                    meta.last_modified.format("%B %d, %Y").to_string(),
                ),
                None => (None, Local::now().format("%B %d, %Y").to_string()),
            };
            let meeting_data_id = processed
                .iter()
                .find(|(source, _)| source == &key)
                .map(|(_, id)| id.clone());

            entries.push(TranscriptEntry {
                name: keys::base_name(&key).to_string(),
                id: key,
                date,
                size,
                source: "local".to_string(),
                processed: meeting_data_id.is_some(),
                meeting_data_id,
            });
        }
        Ok(entries)
    }

    /// Persist everything a pipeline run produced: the minutes and action
    /// item blobs, the assembled projection blob, and the meeting record.
    ///
    /// The record insert is the canonical write and fails hard; a blob
    /// write failure is logged and skipped so one bad artifact cannot
    /// lose the whole meeting.
    pub fn persist_outputs(
        &self,
        record: &MeetingRecord,
        data: &MeetingData,
    ) -> Result<(), StorageError> {
        let minutes = record.minutes_markdown.clone().unwrap_or_default();
        let minutes_key = keys::minutes_key(&data.id);
        match self.blobs.put(&minutes_key, minutes.as_bytes(), "text/markdown") {
            Ok(()) => tracing::info!(key = %minutes_key, "Minutes saved"),
            Err(e) => tracing::warn!(key = %minutes_key, error = %e, "Failed to save minutes"),
        }

        if !record.tasks.is_empty() {
            let actions_json = serde_json::to_string_pretty(&record.tasks)
                .unwrap_or_else(|_| "[]".to_string());
            let actions_key = keys::actions_key(&data.id);
            match self.blobs.put(&actions_key, actions_json.as_bytes(), "application/json") {
                Ok(()) => tracing::info!(key = %actions_key, "Actions saved"),
                Err(e) => tracing::warn!(key = %actions_key, error = %e, "Failed to save actions"),
            }
        }

        let data_json =
            serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
        let data_key = keys::meeting_data_key(&data.id);
        match self.blobs.put(&data_key, data_json.as_bytes(), "application/json") {
            Ok(()) => tracing::info!(key = %data_key, "Meeting data saved"),
            Err(e) => tracing::warn!(key = %data_key, error = %e, "Failed to save meeting data"),
        }

        let conn = self.open_db()?;
        meetings::insert_meeting(&conn, data)?;
        tracing::info!(meeting_id = %data.id, source = %data.source, "Meeting record stored");
        Ok(())
    }

    pub fn get_meeting_data(&self, id: &str) -> Result<Option<MeetingData>, StorageError> {
        let conn = self.open_db()?;
        Ok(meetings::get_meeting(&conn, id)?)
    }

    pub fn list_meeting_data(&self) -> Result<Vec<MeetingData>, StorageError> {
        let conn = self.open_db()?;
        Ok(meetings::list_meetings(&conn)?)
    }

    /// Meeting previously generated from the given transcript, if any.
    /// Callers use this to skip reprocessing.
    pub fn find_by_source(&self, source: &str) -> Result<Option<MeetingData>, StorageError> {
        let conn = self.open_db()?;
        Ok(meetings::get_meeting_by_source(&conn, source)?)
    }

    pub fn high_priority_tasks(&self) -> Result<Vec<MeetingTask>, StorageError> {
        let conn = self.open_db()?;
        Ok(meetings::high_priority_tasks(&conn)?)
    }

    pub fn tasks_by_owner(&self, owner: &str) -> Result<Vec<MeetingTask>, StorageError> {
        let conn = self.open_db()?;
        Ok(meetings::tasks_by_owner(&conn, owner)?)
    }

    pub fn meetings_by_participant(&self, name: &str) -> Result<Vec<MeetingData>, StorageError> {
        let conn = self.open_db()?;
        Ok(meetings::meetings_by_participant(&conn, name)?)
    }

    /// Rendered minutes markdown for a meeting, read from blob storage.
    pub fn get_minutes(&self, meeting_id: &str) -> Result<Option<String>, StorageError> {
        let Some(bytes) = self.blobs.get(&keys::minutes_key(meeting_id))? else {
            return Ok(None);
        };
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }
}
